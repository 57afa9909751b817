
use probing_buckets::{DoubleHashProber, HashTable, LinearProber, Prober, StringHash};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::io;
use std::time::Instant;

const SAMPLE_SIZE: usize = 200000;

fn random_key<R: Rng>(rng: &mut R) -> String {
    let len: usize = rng.gen_range(4..40);
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn run<P: Prober<String> + Clone>(name: &str, prober: P, samples: &[String]) {
    let mut h: HashTable<String, usize, P, StringHash> =
        HashTable::with_prober(prober, StringHash::new());

    let mut i: usize = 0;
    let now: Instant = Instant::now();
    while i < samples.len() {
        if let Err(e) = h.insert(samples[i].clone(), i) {
            panic!("Failed to insert key {}: {}", samples[i], e);
        }
        i += 1;
    }
    let elapsed: usize = now.elapsed().as_nanos() as usize;

    println!("[{}] Sample size {} actual capacity {}", name, samples.len(), h.capacity());
    println!("[{}] Entries {} load factor {}", name, h.size(), h.load_factor());
    println!("[{}] Avg time to insert {}", name, elapsed as f64 / samples.len() as f64);

    i = 0;
    let now: Instant = Instant::now();
    while i < samples.len() {
        if h.find(&samples[i]).is_none() {
            panic!("Failed to find key {}", samples[i]);
        }
        i += 1;
    }
    let elapsed: usize = now.elapsed().as_nanos() as usize;
    println!("[{}] Avg time to find {}", name, elapsed as f64 / samples.len() as f64);

    i = 0;
    let now: Instant = Instant::now();
    while i < samples.len() {
        h.remove(&samples[i]);
        i += 1;
    }
    let elapsed: usize = now.elapsed().as_nanos() as usize;
    println!("[{}] Avg time to remove {}", name, elapsed as f64 / samples.len() as f64);
    println!("[{}] Entries {} tombstones {}", name, h.size(), h.tombstones());
}

fn main() {
    env_logger::init();

    let mut rng = rand::thread_rng();
    let mut samples: Vec<String> = Vec::with_capacity(SAMPLE_SIZE);
    for _ in 0..SAMPLE_SIZE {
        samples.push(random_key(&mut rng));
    }

    run("linear", LinearProber::new(), &samples);
    run(
        "double hash",
        DoubleHashProber::new(StringHash::randomized()),
        &samples,
    );

    benchmarking::warm_up();
    let lookups = &samples[..1000];
    let bench_result = benchmarking::measure_function(|measurer| {
        let mut h: HashTable<String, usize, LinearProber, StringHash> =
            HashTable::with_prober(LinearProber::new(), StringHash::new());
        for (i, key) in lookups.iter().enumerate() {
            if let Err(e) = h.insert(key.clone(), i) {
                panic!("Failed to insert key {}: {}", key, e);
            }
        }
        measurer.measure(|| {
            for key in lookups {
                h.find(key);
            }
        });
    });
    match bench_result {
        Ok(result) => println!("1000 lookups take {:?}", result.elapsed()),
        Err(e) => println!("Benchmark failed: {:?}", e),
    }

    let mut small: HashTable<String, usize, DoubleHashProber<StringHash>, StringHash> =
        HashTable::with_prober(DoubleHashProber::new(StringHash::new()), StringHash::new());
    for (i, word) in ["cat", "dog", "bird", "fish", "horse"].iter().enumerate() {
        if let Err(e) = small.insert(word.to_string(), i) {
            panic!("Failed to insert key {}: {}", word, e);
        }
    }
    small.remove(&"bird".to_string());
    if let Err(e) = small.report_all(&mut io::stdout()) {
        panic!("Failed to write report: {}", e);
    }
}
