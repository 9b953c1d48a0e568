//! Wiki dialect tests
//!
//! End-to-end checks for zim-style pages, header included.

mod pages;
