pub fn rxndb_examples(task: usize) {
    //

    match task {
        0 => {
            // LOAD THE BUNDLED CATALOGS AND SHOW THE TABLE
            use crate::RxnData::processor::{pretty_print_rxns, RxnProcessor};
            use crate::Utils::load_from_file::load_records_from_files;
            use crate::library_manager::with_library_manager;

            let files = with_library_manager(|manager| manager.catalog_paths());
            let records = load_records_from_files(&files).expect("catalog files not found");
            let processor = RxnProcessor::new(records).unwrap();
            println!("unique phases: {:?}", processor.unique_phases());
            pretty_print_rxns(processor.table());
        }
        1 => {
            // FILTERING BY REACTANTS AND PRODUCTS
            use crate::RxnData::processor::{pretty_print_rxns, CombineMethod, RxnProcessor};
            use crate::Utils::load_from_file::load_records_from_files;
            use crate::library_manager::with_library_manager;

            let files = with_library_manager(|manager| manager.catalog_paths());
            let records = load_records_from_files(&files).expect("catalog files not found");
            let processor = RxnProcessor::new(records).unwrap();

            let reactants = vec!["ky".to_string()];
            let products = vec!["sil".to_string()];
            println!("reactions consuming ky:");
            pretty_print_rxns(&processor.filter_by_reactants(&reactants));
            println!("reactions with ky among reactants AND sil among products:");
            pretty_print_rxns(&processor.filter_by_reactants_and_products(
                &reactants,
                &products,
                CombineMethod::And,
            ));
            println!("reactions touching ky or sil on either side:");
            pretty_print_rxns(&processor.filter_by_reactants_and_products(
                &reactants,
                &products,
                CombineMethod::Or,
            ));
        }
        2 => {
            // SIMILARITY GROUPS AND PLOT COLORS
            use crate::RxnData::processor::{CombineMethod, RxnProcessor};
            use crate::Utils::load_from_file::load_records_from_files;
            use crate::library_manager::with_library_manager;

            let files = with_library_manager(|manager| manager.catalog_paths());
            let records = load_records_from_files(&files).expect("catalog files not found");
            let mut processor = RxnProcessor::new(records).unwrap();

            processor.build_groups(CombineMethod::And);
            let grouping = processor.grouping().unwrap();
            println!("{} similarity groups", grouping.n_groups);
            for row in grouping.annotate(processor.table()) {
                println!(
                    "{}  group {:?}  color {}  {}",
                    row.record.id, row.similarity_group, row.color, row.record.rxn
                );
            }
        }
        3 => {
            // CURVE MIDPOINTS FOR PLOT LABELS
            use crate::RxnData::midpoints::calculate_curve_midpoints;
            use crate::Utils::load_from_file::load_records_from_files;
            use crate::library_manager::with_library_manager;

            let files = with_library_manager(|manager| manager.catalog_paths());
            let records = load_records_from_files(&files).expect("catalog files not found");
            for midpoint in calculate_curve_midpoints(&records) {
                println!(
                    "{}: label at T = {:.1} C, P = {:.2} GPa ({})",
                    midpoint.id, midpoint.t, midpoint.p, midpoint.rxn
                );
            }
        }
        _ => {
            println!("no such task");
        }
    }
}
