use anyhow::{Result, bail};

/// An ordered set of pre-rendered text frames. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSet {
    frames: Vec<String>,
}

impl FrameSet {
    /// An empty list would make the playback wraparound divide by zero,
    /// so it is rejected here instead.
    pub fn new(frames: Vec<String>) -> Result<Self> {
        if frames.is_empty() {
            bail!("frame set must contain at least one frame");
        }
        Ok(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, ix: usize) -> Option<&str> {
        self.frames.get(ix).map(String::as_str)
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// Canvas size of the first frame in character cells (columns, rows).
    pub fn canvas_size(&self) -> (usize, usize) {
        let first = &self.frames[0];
        let cols = first.lines().map(str::len).max().unwrap_or(0);
        let rows = first.lines().count();
        (cols, rows)
    }
}

/// Playback over a FrameSet: one frame per tick, wrapping at the end.
pub struct Player {
    frames: FrameSet,
    cursor: usize,
}

impl Player {
    pub fn new(frames: FrameSet) -> Self {
        Self { frames, cursor: 0 }
    }

    /// The frame currently on display.
    pub fn current(&self) -> &str {
        &self.frames.frames()[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.frames.len();
    }

    pub fn rewind(&mut self) {
        self.cursor = (self.cursor + self.frames.len() - 1) % self.frames.len();
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(frames: &[&str]) -> FrameSet {
        FrameSet::new(frames.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_empty_frame_set_rejected() {
        assert!(FrameSet::new(Vec::new()).is_err());
    }

    #[test]
    fn test_advance_wraps_modulo_len() {
        let mut player = Player::new(set(&["a", "b", "c"]));
        for k in 0..20 {
            assert_eq!(player.cursor(), k % 3);
            player.advance();
        }
    }

    #[test]
    fn test_tick_sequence_matches_frame_order() {
        let mut player = Player::new(set(&["a", "b", "c"]));
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(player.current().to_string());
            player.advance();
        }
        assert_eq!(seen, vec!["a", "b", "c", "a"]);
    }

    #[test]
    fn test_single_frame_never_changes() {
        let mut player = Player::new(set(&["only"]));
        for _ in 0..10 {
            assert_eq!(player.current(), "only");
            player.advance();
        }
        assert_eq!(player.cursor(), 0);
    }

    #[test]
    fn test_rewind_is_inverse_of_advance() {
        let mut player = Player::new(set(&["a", "b", "c"]));
        player.rewind();
        assert_eq!(player.current(), "c");
        player.advance();
        assert_eq!(player.current(), "a");
    }

    #[test]
    fn test_reset_returns_to_first_frame() {
        let mut player = Player::new(set(&["a", "b", "c"]));
        player.advance();
        player.advance();
        player.reset();
        assert_eq!(player.current(), "a");
    }

    #[test]
    fn test_canvas_size_uses_first_frame() {
        let frames = set(&["..#\n#..\n...", "x"]);
        assert_eq!(frames.canvas_size(), (3, 3));
    }
}
