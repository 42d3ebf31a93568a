use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stundenplan_libs::{
    Aggregate, Day, Event, MinuteAggregator, Normalizer, ScheduleRecord, ScheduleStore,
    SliceAggregator, TimeRange, UserSchedule,
};

fn campus(users: usize) -> Vec<UserSchedule> {
    (0..users)
        .map(|user_id| {
            let events = (0..12)
                .map(|n| {
                    let start = (8 * 60 + ((user_id * 37 + n * 53) % 600)) as u16;
                    Event::new(
                        user_id,
                        &user_id.to_string(),
                        &format!("Course {}", n),
                        Day::ALL[(user_id + n) % 5],
                        chrono::NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
                        TimeRange::new(start, start + 50 + (n as u16 % 3) * 25),
                    )
                    .unwrap()
                })
                .collect();
            UserSchedule::new(user_id, &user_id.to_string(), events)
        })
        .collect()
}

fn aggregate(c: &mut Criterion) {
    let schedules = campus(100);

    c.bench_function("slice aggregate", |b| {
        let aggregator = SliceAggregator::default();
        b.iter(|| black_box(aggregator.aggregate(&schedules)))
    });

    c.bench_function("minute aggregate", |b| {
        b.iter(|| black_box(MinuteAggregator.aggregate(&schedules)))
    });
}

fn normalize(c: &mut Criterion) {
    let records = (1..=28)
        .map(|day| {
            ScheduleRecord::new(
                "Algebra",
                &format!("09/{:02}/2025", day),
                "09:00 AM",
                "10:15 AM",
            )
        })
        .collect::<Vec<_>>();

    c.bench_function("normalize", |b| {
        let normalizer = Normalizer::default();
        b.iter(|| black_box(normalizer.normalize(&records, 0, "ada")))
    });

    c.bench_function("upload and clear", |b| {
        let store = ScheduleStore::new();
        let normalizer = Normalizer::default();
        let csv = "Subject,Start Date,Start Time,End Date,End Time,Location,Description\n\
                   Algebra,09/01/2025,09:00 AM,09/01/2025,10:15 AM,Hall A,\n\
                   Physics,09/02/2025,11:00 AM,09/02/2025,12:15 PM,Hall B,\n";
        b.iter(|| {
            black_box(store.upload(csv.as_bytes(), "ada", &normalizer)).ok();
            store.clear();
        })
    });
}

criterion_group!(benches, aggregate, normalize);
criterion_main!(benches);
