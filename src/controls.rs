//! Keyboard bindings.

use winit::keyboard::{Key, NamedKey};

/// Everything a key press can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    ToggleFullscreen,
    ShowWaterfall,
    ShowParticles,
    ShowWobble,
    ToggleColorful,
    ToggleSpiral,
    ToggleTornado,
    ToggleAmplitudeEmphasis,
    ToggleBoth,
    Bigger,
    Smaller,
    Faster,
    Slower,
    More,
    Fewer,
}

impl Command {
    /// Map a logical key to a command; unbound keys yield `None`
    pub fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::Named(NamedKey::Escape) => Some(Self::Quit),
            Key::Named(NamedKey::ArrowUp) => Some(Self::Faster),
            Key::Named(NamedKey::ArrowDown) => Some(Self::Slower),
            Key::Named(NamedKey::ArrowRight) => Some(Self::More),
            Key::Named(NamedKey::ArrowLeft) => Some(Self::Fewer),
            Key::Character(c) => match c.as_str() {
                "q" => Some(Self::Quit),
                "h" => Some(Self::Help),
                "s" => Some(Self::ToggleFullscreen),
                "w" => Some(Self::ShowWaterfall),
                "p" => Some(Self::ShowParticles),
                "v" => Some(Self::ShowWobble),
                "c" => Some(Self::ToggleColorful),
                "o" => Some(Self::ToggleSpiral),
                "t" => Some(Self::ToggleTornado),
                "a" => Some(Self::ToggleAmplitudeEmphasis),
                "b" => Some(Self::ToggleBoth),
                "." => Some(Self::Bigger),
                "," => Some(Self::Smaller),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Usage banner printed at startup and on `h`
pub const HELP: &str = "\
----------------------------------------------------
SUNDANCE - audio-reactive visualizer
----------------------------------------------------
MODES
'w' - display waterfall spectrum
'p' - display flowing particles
'v' - display wobbling waveform and walls
----------------------------------------------------
COMMANDS
's' - toggle fullscreen
'q' - quit visualization (also ESC)
'h' - print this help message
'c' - toggle 'colorful' mode
'o' - toggle particles spiral mode
't' - toggle particles spiral tornado mode
'a' - toggle high amplitude emphasis
'b' - toggle particles and waterfall together
',' - make particles smaller
'.' - make particles bigger
ARROW_UP    - make particles faster
ARROW_DOWN  - make particles slower
ARROW_LEFT  - make less particles
ARROW_RIGHT - make more particles
----------------------------------------------------";

#[cfg(test)]
mod tests {
    use super::*;

    fn char_key(s: &str) -> Key {
        Key::Character(s.into())
    }

    #[test]
    fn test_letter_bindings() {
        assert_eq!(Command::from_key(&char_key("q")), Some(Command::Quit));
        assert_eq!(Command::from_key(&char_key("w")), Some(Command::ShowWaterfall));
        assert_eq!(Command::from_key(&char_key("t")), Some(Command::ToggleTornado));
        assert_eq!(Command::from_key(&char_key(".")), Some(Command::Bigger));
        assert_eq!(Command::from_key(&char_key(",")), Some(Command::Smaller));
        assert_eq!(Command::from_key(&char_key("z")), None);
    }

    #[test]
    fn test_named_bindings() {
        assert_eq!(
            Command::from_key(&Key::Named(NamedKey::Escape)),
            Some(Command::Quit)
        );
        assert_eq!(
            Command::from_key(&Key::Named(NamedKey::ArrowRight)),
            Some(Command::More)
        );
        assert_eq!(Command::from_key(&Key::Named(NamedKey::Enter)), None);
    }
}
