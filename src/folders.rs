//! Alphabetic app-folder grouping.
//!
//! Partitions application ids into five fixed lexical buckets and derives
//! the declarations that lay the folders out in the application grid. The
//! per-folder settings live in a relocatable schema instantiated once per
//! bucket under the folder list's path.

use reconcile::{Declaration, SettingValue};
use std::ops::RangeInclusive;

/// Schema holding the folder list itself.
pub const APP_FOLDERS_SCHEMA: &str = "org.gnome.desktop.app-folders";

/// Relocatable per-folder schema.
pub const FOLDER_SCHEMA: &str = "org.gnome.desktop.app-folders.folder";

/// Fixed bucket table, iterated in order with first match winning.
const BUCKETS: [(&str, RangeInclusive<char>); 5] = [
    ("A-E", 'A'..='E'),
    ("F-J", 'F'..='J'),
    ("K-O", 'K'..='O'),
    ("P-T", 'P'..='T'),
    ("U-Z", 'U'..='Z'),
];

/// One alphabetic bucket with the ids that landed in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub id: &'static str,
    pub members: Vec<String>,
}

/// Partition `items` into the fixed buckets.
///
/// Dispatch is by the uppercased first character; ids starting outside A-Z
/// are dropped. The partition is stable: member order inside a bucket
/// follows input order.
pub fn partition<S: AsRef<str>>(items: &[S]) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = BUCKETS
        .iter()
        .map(|(id, _)| Bucket {
            id,
            members: Vec::new(),
        })
        .collect();

    for item in items {
        let item = item.as_ref();
        let Some(first) = item.chars().next() else {
            continue;
        };
        let first = first.to_ascii_uppercase();
        if let Some(index) = BUCKETS.iter().position(|(_, range)| range.contains(&first)) {
            buckets[index].members.push(item.to_string());
        }
    }

    buckets
}

/// Relocation path of a bucket's folder instance.
pub fn folder_path(id: &str) -> String {
    format!("/org/gnome/desktop/app-folders/folders/{id}/")
}

/// Derive the folder declarations for a partition.
///
/// Every bucket gets a `name` so the grid layout is the same whether or not
/// a range is currently populated; `apps` lists are declared only where
/// there is something to show. `folder-children` lists every bucket id in
/// table order, merged with `existing_children` so folders created outside
/// this tool survive a run.
pub fn declarations(buckets: &[Bucket], existing_children: &[String]) -> Vec<Declaration> {
    let mut declarations = Vec::new();

    for bucket in buckets {
        let path = folder_path(bucket.id);
        declarations.push(Declaration::set_at(FOLDER_SCHEMA, &path, "name", bucket.id));
        if !bucket.members.is_empty() {
            declarations.push(Declaration::set_at(
                FOLDER_SCHEMA,
                &path,
                "apps",
                SettingValue::StrList(bucket.members.clone()),
            ));
        }
    }

    let mut children: Vec<String> = existing_children.to_vec();
    for bucket in buckets {
        if !children.iter().any(|c| c == bucket.id) {
            children.push(bucket.id.to_string());
        }
    }
    declarations.push(Declaration::set(
        APP_FOLDERS_SCHEMA,
        "folder-children",
        SettingValue::StrList(children),
    ));

    declarations
}
