#![allow(dead_code)]

pub mod penny_testkit;
