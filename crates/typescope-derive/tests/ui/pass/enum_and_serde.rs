use serde::{Deserialize, Serialize};
use typescope::{Classifier, Describe, TypeRegistry};

#[derive(Describe, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum Status {
    Active,
    OnLeave,
    #[serde(rename = "GONE")]
    Retired,
}

#[derive(Describe, Serialize, Deserialize)]
struct Audit {
    created_by: String,
}

#[derive(Describe, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Contract {
    start_date: String,
    #[serde(default)]
    end_date: String,
    #[serde(skip)]
    scratch: String,
    #[serde(flatten)]
    audit: Audit,
    status: Status,
}

/// Newtypes describe as their inner type
#[derive(Describe)]
struct ContractId(u64);

fn main() {
    let mut registry = TypeRegistry::new();
    Contract::register(&mut registry);

    let status = registry.get(Status::descriptor().qualified_name()).unwrap();
    assert_eq!(status.classifier, Classifier::Enum);
    assert_eq!(status.constants, vec!["ACTIVE", "ON_LEAVE", "GONE"]);

    let contract = registry.get(Contract::descriptor().qualified_name()).unwrap();
    let names: Vec<_> = contract
        .properties
        .iter()
        .map(|p| p.attributes.rename.clone().unwrap_or_else(|| p.name.clone()))
        .collect();
    assert_eq!(names, vec!["startDate", "endDate", "scratch", "status"]);
    assert!(contract.properties[1].attributes.optional);
    assert!(contract.properties[2].attributes.transient);
    assert_eq!(contract.supertypes, vec![Audit::descriptor()]);
    assert!(registry.contains(Audit::descriptor().qualified_name()));

    assert_eq!(ContractId::descriptor(), u64::descriptor());
}
