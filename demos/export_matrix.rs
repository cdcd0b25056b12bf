use std::env;

use profiledata::export::request;
use profiledata::export::Assembler;
use profiledata::store::memory;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);

    let src = args.next().expect("missing src");
    let profile = args.next().expect("missing profile");
    let gene = args.next().expect("missing gene");
    let samples = args.collect::<Vec<_>>();

    let store = memory::Builder.try_build_from_path(src)?;

    let request = request::Builder::default()
        .push_profile_id(profile)
        .push_gene(gene)
        .samples(samples)
        .try_build()?;

    let export = Assembler::new(&store, &store, &store).assemble(&request)?;
    print!("{}", export.raw());

    eprintln!(
        "Exported {} rows with {} warnings.",
        export.matrix().num_rows(),
        export.warnings().len()
    );

    Ok(())
}
