use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumIter};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    TryFromPrimitive,
    IntoPrimitive,
    EnumIter,
    Display,
)]
#[repr(u8)]
pub enum Opcode {
    // I/O
    READ = 10,
    WRITE = 11,
    NEWLINE = 12,

    // Load / Store
    LOAD = 20,
    STORE = 21,

    // Arithmetic
    ADD = 30,
    SUBTRACT = 31,
    DIVIDE = 32,
    MULTIPLY = 33,
    REMAINDER = 34,
    POWER = 35,

    // Control
    BRANCH = 40,
    BRANCHNEG = 41,
    BRANCHZERO = 42,
    HALT = 43,
}

impl Opcode {
    /// Decode the two leading digits of a word.
    pub fn from_code(code: i32) -> Option<Self> {
        u8::try_from(code)
            .ok()
            .and_then(|code| Self::try_from(code).ok())
    }

    pub fn code(self) -> i32 {
        u8::from(self) as i32
    }

    /// Whether the operand designates an instruction address rather than a data slot.
    pub fn is_branch(self) -> bool {
        matches!(self, Opcode::BRANCH | Opcode::BRANCHNEG | Opcode::BRANCHZERO)
    }
}

#[test]
fn test() {
    assert_eq!(Opcode::READ.to_string(), "READ");
    assert_eq!(Opcode::BRANCHZERO.to_string(), "BRANCHZERO");
    assert_eq!(Opcode::from_code(35), Some(Opcode::POWER));
    assert_eq!(Opcode::from_code(13), None);
    assert_eq!(Opcode::from_code(-43), None);
    assert_eq!(Opcode::from_code(300), None);
    assert_eq!(Opcode::STORE.code(), 21);

    use strum::IntoEnumIterator;
    for op in Opcode::iter() {
        assert_eq!(Opcode::from_code(op.code()), Some(op));
        assert_eq!(op.is_branch(), op.to_string().starts_with("BRANCH"));
    }
}
