pub mod input;
pub mod modern;
pub mod modern_helpers;
pub mod pipe;
pub mod styles;
