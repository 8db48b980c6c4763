pub mod math_utils;
pub mod time_utils;
