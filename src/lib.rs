//! `profiledata` is a crate for querying genomic alteration profiles and
//! exporting them as tab-delimited matrices.
//!
//! The crate provides two main points of entry:
//!
//! - Counting mutations in a gene, optionally bounded by position and scoped
//!   to a set of studies.
//! - Assembling multi-gene, multi-profile alteration matrices.
//!
//! Both sit on top of a small set of data-access contracts defined in
//! [`store`]. The crate ships an in-memory implementation of each of them,
//! [`store::memory::Store`], which is built from a line-oriented dump file.
//! Any other backend (e.g., a relational database) can be used by
//! implementing the traits in [`store`] instead.
//!
//! ## Counting mutations
//!
//! A [`mutation::Query`] names a gene and, optionally, an inclusive
//! [`mutation::PositionRange`] and a set of studies. Any
//! [`mutation::MutationCountAccessor`] can answer the query either per study
//! or aggregated across every matching study.
//!
//! ```
//! use profiledata::mutation::MutationCountAccessor;
//! use profiledata::mutation::PositionRange;
//! use profiledata::mutation::Query;
//! use profiledata::store::memory;
//!
//! let data = b"mutation\tluad\tS1\tKRAS\t12\t12\nmutation\tpaad\tP1\tKRAS\t12\t12\n";
//! let store = memory::Builder.try_build_from(&data[..])?;
//!
//! let query = Query::try_new("KRAS")?.range(PositionRange::try_new(12, 12)?);
//!
//! for count in store.counts_per_study(&query)? {
//!     println!("{count}");
//! }
//!
//! assert_eq!(store.counts(&query)?.count(), 2);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Exporting profile data
//!
//! An [`export::Assembler`] turns an [`export::Request`] (profile ids, gene
//! identifiers and sample ids) into an [`export::Export`]: the tab-delimited
//! text, that text parsed back into a [`matrix::Matrix`], any warnings raised
//! for genes that could not be resolved, and (when a single profile was
//! requested) a [`profile_data::ProfileData`] for looking values up by gene
//! and sample.
//!
//! ```
//! use profiledata::export::request::Builder;
//! use profiledata::export::Assembler;
//! use profiledata::store::memory;
//!
//! let data = b"profile\tbrca_mrna\tMRNA_EXPRESSION\tmRNA
//! gene\t2064\tERBB2
//! value\tbrca_mrna\t2064\tS1\t4.2
//! ";
//! let store = memory::Builder.try_build_from(&data[..])?;
//! let assembler = Assembler::new(&store, &store, &store);
//!
//! let request = Builder::default()
//!     .push_profile_id("brca_mrna")
//!     .genes(["ERBB2", "NOT_A_GENE"])
//!     .whitespace_delimited_samples("S1 S2")
//!     .try_build()?;
//!
//! let export = assembler.assemble(&request)?;
//! print!("{}", export.raw());
//!
//! assert_eq!(export.warnings().len(), 1);
//! assert_eq!(export.matrix().get(1, 2), Some("4.2"));
//! assert_eq!(export.matrix().get(1, 3), Some("NaN"));
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod export;
pub mod gene;
pub mod matrix;
pub mod mutation;
pub mod profile;
pub mod profile_data;
pub mod store;

pub use export::Assembler;
pub use export::Export;
pub use export::Request;
pub use matrix::Matrix;
