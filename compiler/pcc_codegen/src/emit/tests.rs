use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::int_load;
use crate::register::Reg;

/// Evaluate the emitted load sequence.
fn run(lines: &[String]) -> i32 {
    let mut value = 0i32;
    for line in lines {
        let operands: Vec<&str> = line
            .split(|c: char| c == ' ' || c == ',')
            .filter(|s| !s.is_empty())
            .collect();
        let imm = |s: &str| s.parse::<u16>().unwrap_or_else(|_| panic!("bad immediate in {line}"));
        match operands.as_slice() {
            ["movi", _, v] => value = i32::from(imm(v)),
            ["subi", _, "r0", v] => value = -i32::from(imm(v)),
            ["movhi", _, v] => value = (u32::from(imm(v)) << 16).cast_signed(),
            ["ori", _, _, v] => value |= i32::from(imm(v)),
            other => panic!("unexpected instruction {other:?}"),
        }
    }
    value
}

#[test]
fn test_small_values_use_one_instruction() {
    assert_eq!(int_load(Reg::Temp(1), 7), vec!["movi r1, 7".to_string()]);
    assert_eq!(int_load(Reg::Temp(1), 65535), vec!["movi r1, 65535".to_string()]);
    assert_eq!(int_load(Reg::Arg(0), -5), vec!["subi a0, r0, 5".to_string()]);
}

#[test]
fn test_wide_values_use_high_and_low_halves() {
    assert_eq!(int_load(Reg::Temp(2), 65536), vec!["movhi r2, 1".to_string()]);
    assert_eq!(
        int_load(Reg::Temp(2), 70000),
        vec!["movhi r2, 1".to_string(), "ori r2, r2, 4464".to_string()]
    );
}

#[test]
fn test_negative_wide_values_print_unsigned_halves() {
    assert_eq!(
        int_load(Reg::Temp(1), -100_000),
        vec!["movhi r1, 65534".to_string(), "ori r1, r1, 31072".to_string()]
    );
    assert_eq!(int_load(Reg::Temp(1), i32::MIN), vec!["movhi r1, 32768".to_string()]);
}

proptest! {
    #[test]
    fn load_reconstructs_value(value in any::<i32>()) {
        let lines = int_load(Reg::Temp(1), value);
        let narrow = (-0xFFFF..=0xFFFF).contains(&value);
        prop_assert_eq!(lines.len() == 1, narrow || value & 0xFFFF == 0);
        prop_assert_eq!(run(&lines), value);
    }
}
