mod filename;

#[cfg(test)]
mod filename_tests;

pub use filename::FilenameSanitizer;
