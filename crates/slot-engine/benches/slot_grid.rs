use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use slot_engine::interval::MinuteRange;
use slot_engine::slots::{generate_slots, SlotGrid};
use slot_engine::{
    available_slots, Booking, BookingStatus, BusinessSchedule, InMemorySource, Service, SlotRequest,
};

fn busy_day() -> Vec<MinuteRange> {
    (0..40)
        .map(|i| {
            let start = 480 + i * 20;
            MinuteRange::new(start, start + 15)
        })
        .collect()
}

fn bench_grid(c: &mut Criterion) {
    let blocked = busy_day();
    let grid = SlotGrid {
        window: MinuteRange::new(0, 1440),
        break_range: Some(MinuteRange::new(720, 780)),
        blocked: &blocked,
        cadence: 5,
        total_slot_minutes: 45,
        now_cutoff: None,
    };

    c.bench_function("generate_slots/full_day_5min", |b| {
        b.iter(|| generate_slots(black_box(&grid)))
    });
}

fn bench_request(c: &mut Criterion) {
    let schedule = BusinessSchedule {
        timezone: "UTC".to_string(),
        slot_cadence: 5,
        ..BusinessSchedule::default()
    };
    let mut source = InMemorySource::new(schedule).with_service(
        "consult",
        Service {
            duration: 45,
            buffer_after: 10,
            ..Service::default()
        },
    );
    for hour in 9..17 {
        source = source.with_booking(Booking {
            start: format!("2026-03-16T{:02}:00:00Z", hour).parse().unwrap(),
            end: None,
            status: BookingStatus::Confirmed,
            staff_id: None,
        });
    }
    let request = SlotRequest::new("2026-03-16", "consult");
    let now = "2026-03-10T08:00:00Z".parse().unwrap();

    c.bench_function("available_slots/in_memory", |b| {
        b.iter(|| available_slots(black_box(&source), black_box(&request), now))
    });
}

criterion_group!(benches, bench_grid, bench_request);
criterion_main!(benches);
