use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mson::{
    mson, split_top_level, FieldDefinition, FragmentManager, MsonSchema, MsonSerializer, MsonValue,
    ScalarType,
};

fn product_schema() -> MsonSchema {
    MsonSchema::new().with_root(
        FieldDefinition::object("Product")
            .add_field(FieldDefinition::scalar("id", ScalarType::Integer))
            .unwrap()
            .add_field(FieldDefinition::scalar("name", ScalarType::Text))
            .unwrap()
            .add_field(FieldDefinition::scalar("price", ScalarType::Float))
            .unwrap()
            .add_field(FieldDefinition::array(
                "tags",
                FieldDefinition::scalar_item(ScalarType::Text),
            ))
            .unwrap(),
    )
}

fn product_value(id: i64) -> MsonValue {
    mson!({
        "id": id,
        "name": "Licensed Wooden Bacon",
        "price": 374.9,
        "tags": ["Grocery", "Games", "Baby"]
    })
}

fn array_schema() -> MsonSchema {
    MsonSchema::new().with_root(FieldDefinition::array(
        "products",
        FieldDefinition::object("Product")
            .add_field(FieldDefinition::scalar("id", ScalarType::Integer))
            .unwrap()
            .add_field(FieldDefinition::scalar("name", ScalarType::Text))
            .unwrap()
            .add_field(FieldDefinition::scalar("price", ScalarType::Float))
            .unwrap(),
    ))
}

fn benchmark_serialize_object(c: &mut Criterion) {
    let serializer = MsonSerializer::new(product_schema());
    let value = product_value(123456789);

    c.bench_function("serialize_object", |b| {
        b.iter(|| serializer.serialize_value(black_box(&value)))
    });
}

fn benchmark_deserialize_object(c: &mut Criterion) {
    let serializer = MsonSerializer::new(product_schema());
    let message = serializer
        .serialize_value(&product_value(123456789))
        .unwrap()
        .message;

    c.bench_function("deserialize_object", |b| {
        b.iter(|| serializer.deserialize_value(black_box(&message)))
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array");

    for size in [10, 50, 100, 500].iter() {
        let serializer = MsonSerializer::new(array_schema());
        let items: Vec<MsonValue> = (0..*size)
            .map(|i| mson!({ "id": i, "name": "Widget", "price": 9.99 }))
            .collect();
        let value = MsonValue::Array(items);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| serializer.serialize_value(black_box(&value)))
        });
    }

    group.finish();
}

fn benchmark_split_top_level(c: &mut Criterion) {
    let content = "{a,b,[c,d]},e,f\\,g,".repeat(200);

    c.bench_function("split_top_level", |b| {
        b.iter(|| split_top_level(black_box(&content)))
    });
}

fn benchmark_fragmentation(c: &mut Criterion) {
    let manager = FragmentManager::new(500);
    let content = "x".repeat(10_000);

    c.bench_function("fragment_10k", |b| {
        b.iter(|| manager.fragment('1', black_box(&content)))
    });

    let fragments = manager.fragment('1', &content).unwrap();
    c.bench_function("reassemble_10k", |b| {
        b.iter(|| FragmentManager::reassemble(black_box(&fragments)))
    });
}

criterion_group!(
    benches,
    benchmark_serialize_object,
    benchmark_deserialize_object,
    benchmark_serialize_array,
    benchmark_split_top_level,
    benchmark_fragmentation
);
criterion_main!(benches);
