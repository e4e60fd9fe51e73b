use tabpipe::StreamOptions;

/// Separator written by screen-refreshing tools between two frames.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Joins screen fixtures the way a watch-style command emits them.
pub fn screen_stream(screens: &[&str]) -> String {
    screens.join(CLEAR_SCREEN)
}

pub fn default_options() -> StreamOptions {
    StreamOptions::defaults().expect("default options should build")
}
