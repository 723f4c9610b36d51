use slicekit::{TextSlice, Utf16Slice, Utf32Slice, Utf8Slice};

#[test]
fn test_num_chars_counts_code_points() {
    let s = Utf8Slice::from_str("日本語");
    assert_eq!(s.len(), 9);
    assert_eq!(s.num_chars(), 3);

    let wide: Vec<u16> = "a日🦀".encode_utf16().collect();
    let s = Utf16Slice::from_units(&wide);
    assert_eq!(s.len(), 4);
    assert_eq!(s.num_chars(), 3);

    let dwide: Vec<u32> = "a日🦀".chars().map(|c| c as u32).collect();
    let s = Utf32Slice::from_units(&dwide);
    assert_eq!(s.len(), 3);
    assert_eq!(s.num_chars(), 3);
}

#[test]
fn test_char_pops_are_width_aware() {
    let mut s = Utf8Slice::from_str("aöz");
    assert_eq!(s.front_char(), 'a');
    assert_eq!(s.back_char(), 'z');
    assert_eq!(s.pop_front_char(), 'a');
    assert_eq!(s.pop_back_char(), 'z');
    assert_eq!(s.pop_front_char(), 'ö');
    assert!(s.is_empty());

    let wide: Vec<u16> = "x🦀".encode_utf16().collect();
    let mut s = Utf16Slice::from_units(&wide);
    assert_eq!(s.back_char(), '🦀');
    assert_eq!(s.pop_back_char(), '🦀');
    assert_eq!(s.pop_back_char(), 'x');
    assert!(s.is_empty());
}

#[test]
fn test_chars_iterator() {
    let s = Utf8Slice::from_str("hé🦀");
    let collected: Vec<char> = s.chars().collect();
    assert_eq!(collected, vec!['h', 'é', '🦀']);
}

#[test]
fn test_case_insensitive_ops() {
    let a = Utf8Slice::from_str("Hello World");
    let b = Utf8Slice::from_str("hello world");
    assert!(a.eq_ic(b));
    assert!(!a.view().eq(b.view()));

    assert!(a.begins_with_ic(Utf8Slice::from_str("HELLO")));
    assert!(a.ends_with_ic(Utf8Slice::from_str("world")));
    assert_eq!(a.cmp_ic(b), std::cmp::Ordering::Equal);

    assert_eq!(a.find_first_ic(b'w'), 6);
    assert_eq!(a.find_last_ic(b'L'), 9);
    assert_eq!(a.find_first_ic(b'z'), a.len());

    assert_eq!(a.find_first_seq_ic(Utf8Slice::from_str("WORLD")), 6);
    assert_eq!(a.find_last_seq_ic(Utf8Slice::from_str("lo")), 3);
    assert_eq!(a.find_first_seq_ic(Utf8Slice::from_str("nope")), a.len());

    assert_eq!(
        a.get_left_at_first_ic(b'W', false).as_slice(),
        b"Hello "
    );
    assert_eq!(
        a.get_right_at_first_seq_ic(Utf8Slice::from_str("WORLD"), true)
            .as_slice(),
        b"World"
    );
    // not found keeps the policy of the case-sensitive splits
    assert_eq!(a.get_left_at_last_ic(b'?', false).len(), 0);
    assert_eq!(a.get_right_at_last_ic(b'?', false).len(), a.len());
}

#[test]
fn test_trim() {
    let s = Utf8Slice::from_str(" \t hello \n");
    assert_eq!(s.trim().as_slice(), b"hello");
    assert_eq!(s.trim_front().as_slice(), b"hello \n");
    assert_eq!(s.trim_back().as_slice(), b" \t hello");

    let blank = Utf8Slice::from_str("   ");
    assert!(blank.trim().is_empty());
}

#[test]
fn test_pop_word() {
    let mut s = Utf8Slice::from_str("  one two\tthree  ");
    assert_eq!(s.pop_word().as_slice(), b"one");
    assert_eq!(s.pop_word().as_slice(), b"two");
    assert_eq!(s.pop_word().as_slice(), b"three");
    assert!(s.pop_word().is_empty());
}

#[test]
fn test_parse_int() {
    assert_eq!(Utf8Slice::from_str("10").parse_int(false, 10), 10);
    assert_eq!(Utf8Slice::from_str("-42").parse_int(false, 10), -42);
    assert_eq!(Utf8Slice::from_str("+7").parse_int(false, 10), 7);
    assert_eq!(Utf8Slice::from_str("777").parse_int(false, 8), 0x1FF);
    assert_eq!(Utf8Slice::from_str("10").parse_int(false, 2), 2);
    assert_eq!(Utf8Slice::from_str("ff").parse_int(false, 16), 255);
    assert_eq!(Utf8Slice::from_str("FF").parse_int(false, 16), 255);

    // base detection: $ and 0x select hex, a leading b selects binary
    assert_eq!(Utf8Slice::from_str("0x10").parse_int(true, 10), 16);
    assert_eq!(Utf8Slice::from_str("0X10").parse_int(true, 10), 16);
    assert_eq!(Utf8Slice::from_str("$10").parse_int(true, 10), 16);
    assert_eq!(Utf8Slice::from_str("b10").parse_int(true, 10), 2);
    assert_eq!(Utf8Slice::from_str("B10").parse_int(true, 10), 2);
    assert_eq!(Utf8Slice::from_str("10").parse_int(true, 10), 10);

    // parsing stops at the first unacceptable unit
    assert_eq!(Utf8Slice::from_str("12ab").parse_int(false, 10), 12);
    assert_eq!(Utf8Slice::from_str("").parse_int(false, 10), 0);
    assert_eq!(Utf8Slice::from_str("junk").parse_int(false, 10), 0);

    // wide views parse identically
    let wide: Vec<u16> = "0x1f".encode_utf16().collect();
    assert_eq!(Utf16Slice::from_units(&wide).parse_int(true, 10), 0x1F);
}

#[test]
#[should_panic]
fn test_parse_int_rejects_unsupported_base() {
    Utf8Slice::from_str("11").parse_int(false, 12);
}

#[test]
fn test_parse_float() {
    assert_eq!(Utf8Slice::from_str("1.5").parse_float(), 1.5);
    assert_eq!(Utf8Slice::from_str("1.5e+3").parse_float(), 1500.0);
    assert_eq!(Utf8Slice::from_str("1.5E-3").parse_float(), 0.0015);
    assert_eq!(Utf8Slice::from_str("-2.25").parse_float(), -2.25);
    assert_eq!(Utf8Slice::from_str("42").parse_float(), 42.0);
    assert_eq!(Utf8Slice::from_str("1e2").parse_float(), 100.0);
    assert_eq!(Utf8Slice::from_str("").parse_float(), 0.0);

    let wide: Vec<u32> = "2.5e2".chars().map(|c| c as u32).collect();
    assert_eq!(Utf32Slice::from_units(&wide).parse_float(), 250.0);
}

#[test]
fn test_hash_is_fnv1a_over_bytes() {
    // FNV-1a of "a": (0x811C9DC5 ^ 0x61) * 0x01000193
    let expected = (0x811C_9DC5u32 ^ 0x61).wrapping_mul(0x0100_0193);
    assert_eq!(Utf8Slice::from_str("a").hash32(), expected);

    assert_eq!(Utf8Slice::from_str("").hash32(), 0x811C_9DC5);
    assert_eq!(
        Utf8Slice::from_str("abc").hash32_seeded(0x811C_9DC5),
        Utf8Slice::from_str("abc").hash32()
    );
    // hashes raw code units, so width changes the hash
    let wide: Vec<u16> = "abc".encode_utf16().collect();
    assert_ne!(
        Utf16Slice::from_units(&wide).hash32(),
        Utf8Slice::from_str("abc").hash32()
    );
}

#[test]
fn test_to_c_string_truncates() {
    let s = Utf8Slice::from_str("hello");
    let mut buf = [0xFFu8; 8];
    assert_eq!(s.to_c_string(&mut buf), 5);
    assert_eq!(&buf[..6], b"hello\0");

    let mut small = [0xFFu8; 4];
    assert_eq!(s.to_c_string(&mut small), 3);
    assert_eq!(&small, b"hel\0");
}

#[test]
fn test_display_and_debug() {
    let s = Utf8Slice::from_str("day 日");
    assert_eq!(format!("{}", s), "day 日");
    assert_eq!(format!("{:?}", s), "\"day 日\"");

    let wide: Vec<u16> = "日本".encode_utf16().collect();
    assert_eq!(format!("{}", Utf16Slice::from_units(&wide)), "日本");
}

#[test]
fn test_base_view_ops_reach_through() {
    let mut s = Utf8Slice::from_str("a,b");
    // generic Slice operations are available on a text view
    assert_eq!(s.find_first(&b','), 1);
    assert_eq!(s.pop_front(), &b'a');
    let s2: TextSlice<u8> = s;
    assert_eq!(s2.as_slice(), b",b");
}
