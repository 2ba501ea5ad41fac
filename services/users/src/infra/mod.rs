pub mod db;
pub mod hasher;
