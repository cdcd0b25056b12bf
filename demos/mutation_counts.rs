use std::env;

use profiledata::mutation::MutationCountAccessor;
use profiledata::mutation::Query;
use profiledata::store::memory;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);

    let src = args.next().expect("missing src");
    let gene = args.next().expect("missing gene");

    let store = memory::Builder.try_build_from_path(src)?;
    let query = Query::try_new(gene)?;

    for count in store.counts_per_study(&query)? {
        println!("{count}");
    }

    println!("Counted {} mutated samples in total.", store.counts(&query)?.count());

    Ok(())
}
