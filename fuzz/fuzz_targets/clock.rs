#![no_main]
use libfuzzer_sys::fuzz_target;
use stundenplan_libs::clock::{format_hhmm, parse_clock, parse_date};

fuzz_target!(|data: &str| {
    if let Ok(minutes) = parse_clock(data) {
        assert!(minutes < 24 * 60, "{:?} parsed past midnight: {}", data, minutes);

        let hhmm = format_hhmm(minutes);
        let (hours, rest) = hhmm.split_at(2);
        assert_eq!(
            hours.parse::<u16>().unwrap() * 60 + rest[1..].parse::<u16>().unwrap(),
            minutes
        );
    }

    let _ = parse_date(data);
});
