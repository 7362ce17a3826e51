/// One memory cell of the machine. Valid values lie in `WORD_MIN..=WORD_MAX`.
pub type Word = i32;

pub const MEMORY_SIZE: usize = 1000;
pub const WORD_MAX: Word = 99999;
pub const WORD_MIN: Word = -99999;

pub fn is_word(value: i64) -> bool {
    (WORD_MIN as i64..=WORD_MAX as i64).contains(&value)
}

/// `+00042` / `-00007`
pub fn fmt_word(word: Word) -> String {
    let sign = if word < 0 { '-' } else { '+' };
    format!("{}{:0>5}", sign, word.unsigned_abs())
}

#[test]
fn test() {
    assert_eq!(fmt_word(0), "+00000");
    assert_eq!(fmt_word(42), "+00042");
    assert_eq!(fmt_word(-7), "-00007");
    assert_eq!(fmt_word(WORD_MAX), "+99999");
    assert_eq!(fmt_word(WORD_MIN), "-99999");
    assert!(is_word(99999));
    assert!(is_word(-99999));
    assert!(!is_word(100000));
    assert!(!is_word(-100000));
}
