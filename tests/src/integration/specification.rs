//! # Specification Flows
//!
//! Loading, reference resolution and generation determinism across the
//! specification, package and code generation crates.

#[cfg(test)]
mod tests {
    use crate::fixtures::documents::{self, SHOP, STOCK, WALLET};
    use msfsm_01_specification::{Package, PackageRepository, PackageSet, SpecificationError};
    use msfsm_03_code_generation::GeneratorConfig;
    use msfsm_06_orchestrator::generate_predicted;
    use shared_types::Address;
    use std::fs;

    #[test]
    fn test_unknown_condition_type_rejected_at_load() {
        let text = SHOP.replace("package__wallet__funded", "unknown__x__y");
        let err = documents::specification(&text).unwrap_err();
        assert!(matches!(
            err,
            SpecificationError::UnknownConditionType { ref namespace, .. } if namespace == "unknown"
        ));
    }

    #[test]
    fn test_unknown_automaton_reference() {
        let text = SHOP.replace("automata__Payment__is_completed", "automata__Refund__is_completed");
        let err = documents::specification(&text).unwrap_err();
        assert!(matches!(err, SpecificationError::UnresolvedReference { .. }), "{err}");
    }

    #[test]
    fn test_missing_package_function() {
        let spec = documents::specification(SHOP).unwrap();
        let stock = STOCK.replace("\"available\"", "\"in_stock\"");
        let packages = PackageSet::from_packages([
            Package::from_json_str(WALLET).unwrap(),
            Package::from_json_str(&stock).unwrap(),
        ])
        .unwrap();
        assert!(matches!(
            packages.resolve(&spec),
            Err(SpecificationError::UnresolvedReference { .. })
        ));
    }

    #[test]
    fn test_package_document_round_trip() {
        let package = Package::from_json_str(WALLET).unwrap();
        let again = Package::from_value(package.to_value().unwrap()).unwrap();
        assert_eq!(again, package);
        assert!(again.function("deposit").unwrap().default);
    }

    #[test]
    fn test_repository_loads_required_packages() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("wallet.json"), WALLET).unwrap();
        fs::write(dir.path().join("stock.json"), STOCK).unwrap();

        let spec = documents::specification(SHOP).unwrap();
        let packages = PackageRepository::new(dir.path()).load_required(&spec).unwrap();
        assert_eq!(packages.len(), 2);
        packages.resolve(&spec).unwrap();
    }

    #[test]
    fn test_repository_missing_package() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("wallet.json"), WALLET).unwrap();
        let spec = documents::specification(SHOP).unwrap();
        assert!(PackageRepository::new(dir.path()).load_required(&spec).is_err());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let spec = documents::specification(SHOP).unwrap();
        let packages = documents::shop_packages().unwrap();
        let sender = Address::new([0x42; 20]);
        let generate = || {
            generate_predicted(&spec, &packages, &GeneratorConfig::default(), sender, 7, None)
                .unwrap()
        };
        assert_eq!(generate(), generate());
    }

    #[test]
    fn test_package_declarations_emitted_once_in_order() {
        let spec = documents::specification(SHOP).unwrap();
        let packages = documents::shop_packages().unwrap();
        let contracts = generate_predicted(
            &spec,
            &packages,
            &GeneratorConfig::default(),
            Address::ZERO,
            0,
            None,
        )
        .unwrap();
        let shipping = &contracts.iter().find(|c| c.name == "Shipping").unwrap().source;
        assert_eq!(shipping.matches("struct Item").count(), 1);
        let item = shipping.find("struct Item").unwrap();
        let items = shipping.find("uint32 public items;").unwrap();
        assert!(item < items);
        assert_eq!(shipping.matches("function deposit(").count(), 1);
    }
}
