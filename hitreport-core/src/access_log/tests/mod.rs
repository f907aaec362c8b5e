mod render_tests;
mod test_helpers;
