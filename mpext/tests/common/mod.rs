#![allow(dead_code)]

use mpext::{BoxError, ExtType};
use serde::{Deserialize, Serialize};

// ============================================================================
// Test Types
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl ExtType for Point {
    fn to_msgpack_ext(&self) -> Result<Vec<u8>, BoxError> {
        encode_point(self)
    }

    fn from_msgpack_ext(data: &[u8]) -> Result<Self, BoxError> {
        decode_point(data)
    }
}

/// A type with no `ExtType` impl; registered only through explicit hooks.
#[derive(Clone, Debug, PartialEq)]
pub struct Label(pub String);

pub trait Shape {}

impl Shape for Point {}

// ============================================================================
// Hook Functions
// ============================================================================

pub fn encode_point(point: &Point) -> Result<Vec<u8>, BoxError> {
    Ok(rmp_serde::to_vec(point)?)
}

pub fn decode_point(data: &[u8]) -> Result<Point, BoxError> {
    Ok(rmp_serde::from_slice(data)?)
}

pub fn encode_label(label: &Label) -> Result<Vec<u8>, BoxError> {
    Ok(label.0.as_bytes().to_vec())
}

pub fn decode_label(data: &[u8]) -> Result<Label, BoxError> {
    Ok(Label(String::from_utf8(data.to_vec())?))
}
