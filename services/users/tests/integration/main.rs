mod enrollment_test;
mod user_test;
