use crate::page::KeyInput;

/// Converts keyboard input to the key combination strings shortcuts are
/// registered with.
///
/// The format is decided by the host application which records the
/// shortcuts: the crate only needs to produce the same strings.
pub trait KeyComboEncoder {
    fn encode(&self, input: &KeyInput) -> String;
}

/// Physical key code followed by the pressed modifiers, in the
/// `⌃` `⌥` `⇧` `⌘` order (e.g. `KeyD⌥⇧`).
///
/// Used by desktop hosts, which record any key with modifiers.
#[derive(Clone, Copy, Debug, Default)]
pub struct PhysicalKeyEncoder;

impl KeyComboEncoder for PhysicalKeyEncoder {
    fn encode(&self, input: &KeyInput) -> String {
        let mut combo = input.code.clone();
        if input.ctrl {
            combo.push('⌃');
        }
        if input.alt {
            combo.push('⌥');
        }
        if input.shift {
            combo.push('⇧');
        }
        if input.meta {
            combo.push('⌘');
        }
        combo
    }
}

/// Upper-cased character of the key, modifiers ignored (e.g. `D`).
///
/// Used by hosts which can only record single characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct CharacterKeyEncoder;

impl KeyComboEncoder for CharacterKeyEncoder {
    fn encode(&self, input: &KeyInput) -> String {
        input.key.to_uppercase()
    }
}

/// Key combination format announced in the settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyEncoding {
    #[default]
    Physical,
    Character,
}

impl KeyEncoding {
    pub fn encoder(self) -> Box<dyn KeyComboEncoder> {
        match self {
            KeyEncoding::Physical => Box::new(PhysicalKeyEncoder),
            KeyEncoding::Character => Box::new(CharacterKeyEncoder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(code: &str, key: &str) -> KeyInput {
        KeyInput {
            code: code.to_owned(),
            key: key.to_owned(),
            ..KeyInput::default()
        }
    }

    #[test]
    fn test_physical_encoding() {
        assert_eq!(PhysicalKeyEncoder.encode(&input("KeyD", "d")), "KeyD");
        let all = KeyInput {
            ctrl: true,
            alt: true,
            shift: true,
            meta: true,
            ..input("Digit1", "!")
        };
        assert_eq!(PhysicalKeyEncoder.encode(&all), "Digit1⌃⌥⇧⌘");
        let some = KeyInput {
            shift: true,
            meta: true,
            ..input("Period", ">")
        };
        assert_eq!(PhysicalKeyEncoder.encode(&some), "Period⇧⌘");
    }

    #[test]
    fn test_character_encoding() {
        assert_eq!(CharacterKeyEncoder.encode(&input("KeyD", "d")), "D");
        let shifted = KeyInput {
            shift: true,
            ..input("KeyS", "S")
        };
        assert_eq!(CharacterKeyEncoder.encode(&shifted), "S");
        assert_eq!(KeyEncoding::Character.encoder().encode(&input("KeyX", "x")), "X");
    }
}
