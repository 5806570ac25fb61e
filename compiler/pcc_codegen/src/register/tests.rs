use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_temporaries_before_argument_registers() {
    let mut file = RegisterFile::new();
    let names: Vec<String> = (0..RegisterFile::CAPACITY)
        .filter_map(|_| file.allocate())
        .map(|r| r.to_string())
        .collect();
    assert_eq!(names.first().map(String::as_str), Some("r1"));
    assert_eq!(names[11], "r12");
    assert_eq!(names[12], "a0");
    assert_eq!(names.last().map(String::as_str), Some("a13"));
    assert_eq!(file.allocated(), 26);
    assert_eq!(file.allocate(), None);
}

#[test]
fn test_freed_register_is_reused_first() {
    let mut file = RegisterFile::new();
    let r1 = file.allocate();
    let r2 = file.allocate();
    assert_eq!((r1, r2), (Some(Reg::Temp(1)), Some(Reg::Temp(2))));
    file.free(Reg::Temp(1));
    assert!(!file.is_allocated(Reg::Temp(1)));
    assert_eq!(file.allocate(), Some(Reg::Temp(1)));
    assert_eq!(file.allocated(), 2);
}

#[test]
fn test_fixed_registers_are_not_tracked() {
    let mut file = RegisterFile::new();
    file.allocate();
    for reg in [Reg::Zero, Reg::Frame, Reg::ReturnAddress, Reg::Invalid] {
        file.free(reg);
        assert!(!file.is_allocated(reg));
    }
    assert_eq!(file.allocated(), 1);
    file.clear();
    assert_eq!(file.allocated(), 0);
}

#[test]
fn test_register_names() {
    assert_eq!(Reg::Zero.to_string(), "r0");
    assert_eq!(Reg::Frame.to_string(), "r14");
    assert_eq!(Reg::ReturnAddress.to_string(), "r15");
    assert_eq!(Reg::Invalid.to_string(), "invalidRegister");
    assert_eq!(Value::invalid().ty, Type::Void);
}
