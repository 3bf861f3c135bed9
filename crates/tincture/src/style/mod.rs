//! Style objects: the property maps rules produce and the compiler consumes.
//!
//! A [`StyleObject`] is an ordered map of camelCase CSS property names to
//! [`StyleValue`]s. Values are either scalars (strings and numbers, compiled
//! into declarations) or nested blocks (keyframes, pseudo selectors, media
//! queries).
//!
//! ## Merging
//!
//! Rules merge with [`StyleObject::merge`]: later objects override earlier
//! ones key by key, nested selector blocks merge recursively, and keyframe
//! blocks under [`ANIMATION_NAME`] are replaced as a whole.

mod object;
mod value;

pub use object::{StyleObject, ANIMATION_NAME};
pub use value::StyleValue;
