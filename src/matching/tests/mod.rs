mod common;

mod income;
mod ranking;
mod subscription;
