/// Batch orchestration: plan, music, render, encode.
pub mod lookbook;
