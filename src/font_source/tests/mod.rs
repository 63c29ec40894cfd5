//! Tests for the font data surface
