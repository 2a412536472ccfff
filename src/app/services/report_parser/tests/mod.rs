//! Test modules for the report parser

pub mod parser_tests;
