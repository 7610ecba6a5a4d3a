//! integrated tests

mod stream;
