//! Key code table: physical key positions to dense wire codes.
//!
//! Keys are identified by *position*, using the names of the W3C
//! `KeyboardEvent.code` values, not by the character they produce. A physical
//! key always reports the same code regardless of keyboard layout or the state
//! of Shift, Caps Lock or Num Lock. To detect a capital letter, a receiver
//! checks for one of the Shift codes together with the letter's code.
//!
//! Codes form the contiguous range `0..KEY_COUNT` with no gaps, so a code is
//! also a direct bit index into a [`KeyBitmap`](crate::fixed_width::KeyBitmap).
//! The assignment is part of the wire format and must never change.

/// Number of key codes in the table.
pub const KEY_COUNT: usize = 106;

macro_rules! key_codes {
    ($($name:ident = $code:literal,)*) => {
        /// Physical key position.
        ///
        /// The discriminant is the byte sent on the wire.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[repr(u8)]
        pub enum KeyCode {
            $($name = $code,)*
        }

        impl KeyCode {
            /// Every key code, in code order.
            pub const ALL: [KeyCode; KEY_COUNT] = [$(KeyCode::$name,)*];

            /// The `KeyboardEvent.code` identifier of this key.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(KeyCode::$name => stringify!($name),)*
                }
            }
        }
    };
}

key_codes! {
    // Alphanumeric section
    Backquote = 0,
    Backslash = 1,
    BracketLeft = 2,
    BracketRight = 3,
    Comma = 4,
    Digit0 = 5,
    Digit1 = 6,
    Digit2 = 7,
    Digit3 = 8,
    Digit4 = 9,
    Digit5 = 10,
    Digit6 = 11,
    Digit7 = 12,
    Digit8 = 13,
    Digit9 = 14,
    Equal = 15,
    IntlBackslash = 16,
    IntlRo = 17,
    IntlYen = 18,
    KeyA = 19,
    KeyB = 20,
    KeyC = 21,
    KeyD = 22,
    KeyE = 23,
    KeyF = 24,
    KeyG = 25,
    KeyH = 26,
    KeyI = 27,
    KeyJ = 28,
    KeyK = 29,
    KeyL = 30,
    KeyM = 31,
    KeyN = 32,
    KeyO = 33,
    KeyP = 34,
    KeyQ = 35,
    KeyR = 36,
    KeyS = 37,
    KeyT = 38,
    KeyU = 39,
    KeyV = 40,
    KeyW = 41,
    KeyX = 42,
    KeyY = 43,
    KeyZ = 44,
    Minus = 45,
    Period = 46,
    Quote = 47,
    Semicolon = 48,
    Slash = 49,

    // Functional keys
    AltLeft = 50,
    AltRight = 51,
    Backspace = 52,
    CapsLock = 53,
    ContextMenu = 54,
    ControlLeft = 55,
    ControlRight = 56,
    Enter = 57,
    MetaLeft = 58,
    MetaRight = 59,
    ShiftLeft = 60,
    ShiftRight = 61,
    Space = 62,
    Tab = 63,

    // Control pad
    Delete = 64,
    End = 65,
    Help = 66,
    Home = 67,
    Insert = 68,
    PageDown = 69,
    PageUp = 70,
    ArrowDown = 71,
    ArrowLeft = 72,
    ArrowRight = 73,
    ArrowUp = 74,

    // Numpad
    NumLock = 75,
    Numpad0 = 76,
    Numpad1 = 77,
    Numpad2 = 78,
    Numpad3 = 79,
    Numpad4 = 80,
    Numpad5 = 81,
    Numpad6 = 82,
    Numpad7 = 83,
    Numpad8 = 84,
    Numpad9 = 85,
    NumpadAdd = 86,
    NumpadBackspace = 87,
    NumpadClear = 88,
    NumpadClearEntry = 89,
    NumpadComma = 90,
    NumpadDecimal = 91,
    NumpadDivide = 92,
    NumpadEnter = 93,
    NumpadEqual = 94,
    NumpadHash = 95,
    NumpadMemoryAdd = 96,
    NumpadMemoryClear = 97,
    NumpadMemoryRecall = 98,
    NumpadMemoryStore = 99,
    NumpadMemorySubtract = 100,
    NumpadMultiply = 101,
    NumpadParenLeft = 102,
    NumpadParenRight = 103,
    NumpadStar = 104,
    NumpadSubtract = 105,
}

impl KeyCode {
    /// Wire code of this key.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a key by its wire code.
    ///
    /// Returns `None` for codes outside the table.
    #[inline]
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        if (code as usize) < KEY_COUNT {
            Some(Self::ALL[code as usize])
        } else {
            None
        }
    }

    /// Look up a key by its `KeyboardEvent.code` identifier, e.g. `"KeyA"`.
    ///
    /// The table has no fallback entry: identifiers it does not know (function
    /// keys, media keys, `Escape`, ...) return `None` and must be dropped by
    /// the caller before encoding.
    ///
    /// ```
    /// use keylink_proto::KeyCode;
    ///
    /// assert_eq!(KeyCode::from_name("KeyA"), Some(KeyCode::KeyA));
    /// assert_eq!(KeyCode::from_name("KeyA").map(KeyCode::code), Some(19));
    /// assert_eq!(KeyCode::from_name("F1"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.name() == name)
    }

    /// Alt, Control, Meta or Shift, either side.
    #[must_use]
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::AltLeft
                | Self::AltRight
                | Self::ControlLeft
                | Self::ControlRight
                | Self::MetaLeft
                | Self::MetaRight
                | Self::ShiftLeft
                | Self::ShiftRight
        )
    }

    /// Either Shift key.
    #[must_use]
    pub const fn is_shift(self) -> bool {
        matches!(self, Self::ShiftLeft | Self::ShiftRight)
    }

    /// Caps Lock or Num Lock.
    #[must_use]
    pub const fn is_lock(self) -> bool {
        matches!(self, Self::CapsLock | Self::NumLock)
    }

    /// Keys of the numeric keypad cluster, Num Lock included.
    #[must_use]
    pub const fn is_numpad(self) -> bool {
        self.code() >= Self::NumLock.code()
    }
}

impl From<KeyCode> for u8 {
    #[inline]
    fn from(key: KeyCode) -> Self {
        key.code()
    }
}

impl TryFrom<u8> for KeyCode {
    type Error = u8;

    /// Fails with the rejected byte when it is not a known code.
    #[inline]
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(code)
    }
}

impl core::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_dense_and_ordered() {
        for (i, key) in KeyCode::ALL.iter().enumerate() {
            assert_eq!(key.code() as usize, i);
        }
        assert_eq!(KeyCode::ALL[KEY_COUNT - 1], KeyCode::NumpadSubtract);
    }

    #[test]
    fn test_from_code_roundtrip() {
        for code in 0..=u8::MAX {
            match KeyCode::from_code(code) {
                Some(key) => assert_eq!(key.code(), code),
                None => assert!(code as usize >= KEY_COUNT),
            }
        }
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in KeyCode::ALL.iter().enumerate() {
            for b in &KeyCode::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
            assert_eq!(KeyCode::from_name(a.name()), Some(*a));
        }
    }

    #[test]
    fn test_reference_assignments() {
        assert_eq!(KeyCode::Backquote.code(), 0);
        assert_eq!(KeyCode::IntlBackslash.code(), 16);
        assert_eq!(KeyCode::IntlYen.code(), 18);
        assert_eq!(KeyCode::KeyA.code(), 19);
        assert_eq!(KeyCode::KeyZ.code(), 44);
        assert_eq!(KeyCode::Slash.code(), 49);
        assert_eq!(KeyCode::AltLeft.code(), 50);
        assert_eq!(KeyCode::Tab.code(), 63);
        assert_eq!(KeyCode::Delete.code(), 64);
        assert_eq!(KeyCode::ArrowUp.code(), 74);
        assert_eq!(KeyCode::NumLock.code(), 75);
        assert_eq!(KeyCode::NumpadEnter.code(), 93);
        assert_eq!(KeyCode::NumpadSubtract.code(), 105);
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(KeyCode::from_name(""), None);
        assert_eq!(KeyCode::from_name("Escape"), None);
        assert_eq!(KeyCode::from_name("keya"), None);
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert_eq!(KeyCode::try_from(105), Ok(KeyCode::NumpadSubtract));
        assert_eq!(KeyCode::try_from(106), Err(106));
    }

    #[test]
    fn test_modifier_groups() {
        assert!(KeyCode::ShiftLeft.is_modifier());
        assert!(KeyCode::ShiftRight.is_shift());
        assert!(KeyCode::MetaRight.is_modifier());
        assert!(!KeyCode::CapsLock.is_modifier());
        assert!(KeyCode::CapsLock.is_lock());
        assert!(KeyCode::NumLock.is_lock());
        assert!(KeyCode::NumLock.is_numpad());
        assert!(KeyCode::NumpadStar.is_numpad());
        assert!(!KeyCode::ArrowUp.is_numpad());
    }
}
