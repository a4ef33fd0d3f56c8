pub mod clear;
pub mod counters;
pub mod delete;
pub mod feed;
pub mod friends;
pub mod map;
pub mod new;
pub mod profile;
pub mod share;
