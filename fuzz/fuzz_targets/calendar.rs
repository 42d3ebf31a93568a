#![no_main]
use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;
use stundenplan_libs::{
    Aggregate, Day, Event, MinuteAggregator, SliceAggregator, TimeRange, UserSchedule,
};

fuzz_target!(|data: Vec<Vec<(Day, u16, u8)>>| {
    #[cfg(feature = "log")]
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply();

    let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    let schedules: Vec<UserSchedule> = data
        .into_iter()
        .take(16)
        .enumerate()
        .map(|(user_id, events)| {
            let events = events
                .into_iter()
                .take(16)
                .map(|(day, start, length)| {
                    let start = start % (24 * 60 - 1);
                    let end = (start + 1 + length as u16).min(24 * 60 - 1);
                    Event::new(
                        user_id,
                        &user_id.to_string(),
                        "",
                        day,
                        date,
                        TimeRange::new(start, end),
                    )
                    .unwrap()
                })
                .collect();
            UserSchedule::new(user_id, &user_id.to_string(), events)
        })
        .collect();

    let exact = MinuteAggregator.aggregate(&schedules);
    let coarse = SliceAggregator::default().aggregate(&schedules);
    assert_eq!(exact.is_nothing_uploaded(), schedules.is_empty());
    assert_eq!(coarse.is_nothing_uploaded(), schedules.is_empty());

    for day in Day::ALL.iter() {
        let blocks = exact.blocks(*day);
        for minute in 0..24 * 60 {
            let users = schedules
                .iter()
                .flat_map(|s| s.events_on(*day))
                .filter(|e| e.time().contains(minute))
                .map(|e| e.user_id())
                .collect::<BTreeSet<_>>();
            let containing = blocks.iter().filter(|b| b.time.contains(minute)).count();

            if users.is_empty() {
                assert_eq!(containing, 0, "Uncovered minute {} on {} in a block", minute, day);
            } else {
                assert_eq!(containing, 1, "Minute {} on {} not in exactly one block", minute, day);
            }
        }

        for pair in coarse.blocks(*day).windows(2) {
            assert!(
                pair[0].time.end() <= pair[1].time.start(),
                "Overlapping blocks {} and {}",
                pair[0],
                pair[1]
            );
        }
    }
});
