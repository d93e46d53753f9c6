pub mod rxndb_examples;
