use cart::{Cart, CartId, LineItem, Money};
use criterion::{Criterion, criterion_group, criterion_main};
use session_store::MemorySessionStore;

fn bench_add_item(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("cart/add_item", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = MemorySessionStore::new();
                let mut cart = Cart::open(store, CartId::new("bench")).await.unwrap();
                let item = LineItem::new("SKU-BENCH", "Benchmark Widget", 1, Money::from_cents(1000));
                cart.add(item, 1).await.unwrap();
            });
        });
    });
}

fn bench_hash(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = MemorySessionStore::new();
    let mut cart = rt.block_on(async {
        let mut cart = Cart::open(store, CartId::new("bench")).await.unwrap();
        for i in 0..50 {
            let item = LineItem::new(
                format!("SKU-{i:03}"),
                "Benchmark Widget",
                1,
                Money::from_cents(1000),
            );
            cart.add(item, 3).await.unwrap();
        }
        cart
    });
    cart.on(cart::HookPoint::CostCalculation, |_| Ok(()));

    c.bench_function("cart/hash_50_items", |b| {
        b.iter(|| cart.hash());
    });

    c.bench_function("cart/cost_50_items", |b| {
        b.iter(|| cart.cost(true).unwrap());
    });
}

fn bench_full_mutate_persist_cycle(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("cart/full_add_update_remove", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = MemorySessionStore::new();
                let mut cart = Cart::open(store, CartId::new("bench")).await.unwrap();

                let item = LineItem::new("SKU-001", "Widget", 1, Money::from_cents(1000));
                cart.add(item.clone(), 2).await.unwrap();
                cart.update(item.clone(), 5).await.unwrap();
                cart.remove(&item).await.unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_add_item, bench_hash, bench_full_mutate_persist_cycle);
criterion_main!(benches);
