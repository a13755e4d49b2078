use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlfluent::prelude::*;
use sqlfluent::{DriverCommand, DriverError, Row};

struct NullDriver;

impl Driver for NullDriver {
    fn kind(&self) -> &str {
        "SQLiteConnection"
    }

    fn execute_non_query(&self, _: &DriverCommand<'_>) -> Result<u64, DriverError> {
        Ok(0)
    }

    fn execute_scalar(&self, _: &DriverCommand<'_>) -> Result<Value, DriverError> {
        Ok(Value::Null)
    }

    fn execute_reader(&self, _: &DriverCommand<'_>) -> Result<Vec<Row>, DriverError> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Clone, Default, Entity)]
struct Order {
    id: i64,
    customer: String,
    total: f64,
    shipped: bool,
    note: Option<String>,
}

fn order(i: i64) -> Order {
    Order {
        id: i,
        customer: format!("customer-{i}"),
        total: i as f64 * 1.5,
        shipped: i % 2 == 0,
        note: None,
    }
}

fn bench_select_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/select");
    let db = NullDriver;

    for n in [1, 5, 10, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut cmd = db
                    .select::<Order>()
                    .unwrap()
                    .column(|o| o.id)
                    .unwrap()
                    .column(|o| o.customer)
                    .unwrap()
                    .order_by(|o| o.total)
                    .unwrap();
                for i in 0..n {
                    cmd = cmd.and_where(|o| o.id.ne(i as i64)).unwrap();
                }
                black_box(cmd.to_sql());
            });
        });
    }

    group.finish();
}

fn bench_insert_parameters(c: &mut Criterion) {
    let db = NullDriver;
    let target = order(1);

    c.bench_function("sql_builder/insert_with_parameters", |b| {
        b.iter(|| {
            let cmd = db
                .insert(&target)
                .unwrap()
                .column(|o| o.customer)
                .unwrap()
                .column(|o| o.total)
                .unwrap()
                .column(|o| o.shipped)
                .unwrap()
                .column(|o| o.note)
                .unwrap();
            black_box((cmd.to_sql(), cmd.to_parameters()));
        });
    });
}

fn bench_bulk_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/bulk_insert");
    let db = NullDriver;

    for n in [10, 100, 1000] {
        let items: Vec<Order> = (0..n).map(order).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| {
                let cmd = db
                    .bulk_insert(items)
                    .unwrap()
                    .column(|o| o.id)
                    .unwrap()
                    .column(|o| o.customer)
                    .unwrap()
                    .column(|o| o.total)
                    .unwrap();
                black_box(cmd.to_sql());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_select_render,
    bench_insert_parameters,
    bench_bulk_insert
);
criterion_main!(benches);
