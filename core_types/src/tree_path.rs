//! Materialized tree paths.
//!
//! Every node stores the concatenation of fixed width base-36 segments from the tree root
//! down to itself, e.g. `0001` for the first tree root and `00010003` for its third child.
//! Because all segments have the same width, sorting nodes by path yields a pre-order
//! traversal and the descendants of a node are exactly the nodes whose path starts with
//! the node's path.

use crate::CoreTypeError;

pub const STEP_LEN: usize = 4;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const MAX_SEGMENT: u32 = 36 * 36 * 36 * 36 - 1;

pub fn encode_segment(value: u32) -> Result<String, CoreTypeError> {
    if value == 0 || value > MAX_SEGMENT {
        return Err(CoreTypeError::InvalidArgumentType(format!(
            "Path segment {} is out of range 1..={}",
            value, MAX_SEGMENT
        )));
    }
    let mut digits = [b'0'; STEP_LEN];
    let mut remaining = value;
    for digit in digits.iter_mut().rev() {
        *digit = ALPHABET[(remaining % 36) as usize];
        remaining /= 36;
    }
    Ok(digits.iter().map(|&d| d as char).collect())
}

pub fn decode_segment(segment: &str) -> Result<u32, CoreTypeError> {
    if segment.len() != STEP_LEN {
        return Err(CoreTypeError::ConversionError(format!(
            "Path segment '{}' must be {} characters long",
            segment, STEP_LEN
        )));
    }
    segment.chars().try_fold(0u32, |acc, c| {
        c.to_digit(36)
            .filter(|_| !c.is_ascii_lowercase())
            .map(|d| acc * 36 + d)
            .ok_or_else(|| {
                CoreTypeError::ConversionError(format!(
                    "Invalid character '{}' in path segment '{}'",
                    c, segment
                ))
            })
    })
}

/// Path for a new node placed after `last_sibling`, or as the first child of `parent`
/// when it has no children yet. `parent` is `None` for tree roots.
pub fn next_child_path(
    parent: Option<&str>,
    last_sibling: Option<&str>,
) -> Result<String, CoreTypeError> {
    let next = match last_sibling {
        Some(sibling) if sibling.len() >= STEP_LEN => {
            decode_segment(&sibling[sibling.len() - STEP_LEN..])? + 1
        }
        Some(sibling) => {
            return Err(CoreTypeError::ConversionError(format!(
                "Malformed sibling path '{}'",
                sibling
            )));
        }
        None => 1,
    };
    Ok(format!("{}{}", parent.unwrap_or_default(), encode_segment(next)?))
}

pub fn depth_of(path: &str) -> usize {
    path.len() / STEP_LEN
}

pub fn is_descendant_path(ancestor: &str, path: &str) -> bool {
    path.len() > ancestor.len() && path.starts_with(ancestor)
}
