//! Operator-facing text on stdout.
//!
//! Write failures are ignored: a closed stdout must not turn a finished game
//! into a launcher failure.

use std::io::Write;

use crate::platform::PlatformFamily;

const RULE_WIDTH: usize = 50;

pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(&mut self, text: &str) {
        writeln!(self.out, "{}", text).ok();
    }

    pub fn blank(&mut self) {
        writeln!(self.out).ok();
    }

    fn rule(&mut self, ch: char) {
        let rule = ch.to_string().repeat(RULE_WIDTH);
        self.line(&rule);
    }

    /// ANSI clear + cursor home.
    pub fn clear_screen(&mut self) {
        write!(self.out, "\x1B[2J\x1B[1;1H").ok();
        self.out.flush().ok();
    }

    pub fn banner(&mut self) {
        self.rule('=');
        self.line("   Binary Quest - Enhanced Edition");
        self.rule('=');
        self.blank();
    }

    pub fn error(&mut self, message: &str) {
        self.line(&format!("❌ ERROR: {}", message));
    }

    pub fn build_instructions(&mut self, family: PlatformFamily) {
        self.blank();
        self.line("Please build the game first:");
        for step in family.build_instructions() {
            self.line(step);
        }
        self.blank();
    }

    pub fn starting(&mut self, name: &str) {
        self.line(&format!("🎮 Starting {}...", name));
        self.blank();
        self.line("Controls:");
        self.line("  • A/D or Arrow Keys - Move left/right");
        self.line("  • SPACE - Pause");
        self.line("  • Q - Quit");
        self.blank();
        self.rule('-');
        self.blank();
        // The game takes over the terminal next.
        self.out.flush().ok();
    }

    pub fn interrupted(&mut self) {
        self.line("\n\n⚠️  Game interrupted by user");
    }

    pub fn run_failure(&mut self, message: &str) {
        self.line(&format!("\n\n❌ ERROR running game: {}", message));
    }

    pub fn closing(&mut self) {
        self.blank();
        self.rule('=');
        self.line("Thanks for playing Binary Quest! 🎮");
        self.rule('=');
        self.out.flush().ok();
    }
}
