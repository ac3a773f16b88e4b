pub mod compose;
pub mod direct;
pub mod info;
pub mod preview;
pub mod split;
