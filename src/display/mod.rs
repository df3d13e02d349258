// SPDX-License-Identifier: GPL-3.0-only

//! Display surfaces
//!
//! A [`Window`] shows one named image per tick and reports key presses,
//! much like a `imshow` / `waitKey` pair.

mod terminal;

pub use terminal::TerminalWindow;

use crate::errors::AppResult;
use crate::pipeline::DisplayImage;
use std::time::Duration;

pub trait Window {
    /// Present `image` under `title`, replacing whatever was shown before
    fn show(&mut self, title: &str, image: &DisplayImage) -> AppResult<()>;

    /// Wait up to `timeout` for a key press
    fn wait_key(&mut self, timeout: Duration) -> AppResult<Option<char>>;

    /// Close the window and release the display; called once on exit
    fn destroy(&mut self) -> AppResult<()>;
}
