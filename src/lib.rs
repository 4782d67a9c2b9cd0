//! Dataset tooling for markboard annotations: load a dataset of annotated
//! images and project it to plain JSON, COCO, or a YOLO training bundle.

pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
