//! Hanzi Reader - tap Chinese text in photos to read it
//!
//! Recognizes text regions in an image, then shows the words of a tapped
//! region with pinyin or jyutping over every character and a dictionary
//! gloss per word.

pub mod annotation;
pub mod config;
pub mod dashboard;
pub mod lexicon;
pub mod overlay;
pub mod reader;
pub mod shared;
pub mod storage;
pub mod vision;
