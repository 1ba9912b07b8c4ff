#![allow(dead_code)]

pub mod surfaces;
