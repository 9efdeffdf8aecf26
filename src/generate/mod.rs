/// Remote image generation module
///
/// This module handles:
/// - Building generateContent requests (photo + resolved instruction)
/// - Extracting the produced image from the response as a data URI
/// - Classifying service failures into user-displayable errors

pub mod client;

pub use client::{parse_data_uri, GenerateError, GenerationClient};
