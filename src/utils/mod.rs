mod testing;

pub use testing::*;
