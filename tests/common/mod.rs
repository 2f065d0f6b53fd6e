// Each test binary uses a different subset of the helpers
#![allow(dead_code)]

pub mod admin_helpers;
pub mod utils;
