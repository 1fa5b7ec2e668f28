use crate::{group_sentence_alignments, AlignmentGroup, Correspondence, GroupKind};

fn sentences(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}{}", prefix, i)).collect()
}

/// Group `n_source` x `n_target` placeholder sentences by `pairs`.
fn group(
    n_source: usize,
    n_target: usize,
    pairs: &[(usize, usize)],
) -> Vec<AlignmentGroup<String, String>> {
    let pairs: Vec<Correspondence> = pairs.iter().copied().map(Correspondence::from).collect();
    group_sentence_alignments(
        &sentences("s", n_source),
        &sentences("ps", n_source),
        &sentences("t", n_target),
        &sentences("pt", n_target),
        &pairs,
    )
    .unwrap()
}

/// Render groups as `source indices : target indices`, one per line.
fn shape(groups: &[AlignmentGroup<String, String>]) -> String {
    groups
        .iter()
        .map(|g| format!("{:?} : {:?} {:?}", g.source_indices, g.target_indices, g.kind()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_split_then_one_to_one() {
    let groups = group(2, 3, &[(0, 0), (0, 1), (1, 2)]);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].source, vec!["s0"]);
    assert_eq!(groups[0].source_parses, vec!["ps0"]);
    assert_eq!(groups[0].target, vec!["t0", "t1"]);
    assert_eq!(groups[0].target_parses, vec!["pt0", "pt1"]);
    assert_eq!(groups[0].kind(), GroupKind::Split);

    assert_eq!(groups[1].source, vec!["s1"]);
    assert_eq!(groups[1].target, vec!["t2"]);
    assert_eq!(groups[1].kind(), GroupKind::OneToOne);
}

#[test]
fn test_join() {
    let groups = group(2, 1, &[(0, 0), (1, 0)]);

    insta::assert_snapshot!(shape(&groups), @"[0, 1] : [0] Join");
    let (source, source_parses, target, target_parses) = groups[0].clone().into_parts();
    assert_eq!(source, vec!["s0", "s1"]);
    assert_eq!(source_parses, vec!["ps0", "ps1"]);
    assert_eq!(target, vec!["t0"]);
    assert_eq!(target_parses, vec!["pt0"]);
}

#[test]
fn test_second_join_onto_joined_group_starts_new_group() {
    let groups = group(3, 1, &[(0, 0), (1, 0), (2, 0)]);

    insta::assert_snapshot!(shape(&groups), @r###"
    [2] : [0] OneToOne
    [0, 1] : [0] Join
    "###);
}

#[test]
fn test_join_onto_split_starts_new_group() {
    let groups = group(2, 2, &[(0, 0), (0, 1), (1, 1)]);

    insta::assert_snapshot!(shape(&groups), @r###"
    [1] : [1] OneToOne
    [0] : [0, 1] Split
    "###);
}

#[test]
fn test_split_onto_join_is_dropped() {
    let groups = group(2, 2, &[(0, 0), (1, 0), (0, 1)]);

    insta::assert_snapshot!(shape(&groups), @"[0, 1] : [0] Join");
}

#[test]
fn test_source_sentence_in_one_group_only() {
    let groups = group(3, 3, &[(0, 0), (1, 0), (0, 1), (1, 2), (2, 1)]);

    for index in 0..3 {
        let owners = groups
            .iter()
            .filter(|g| g.source_indices.contains(&index))
            .count();
        assert!(owners <= 1, "source {} is in {} groups", index, owners);
    }
    insta::assert_snapshot!(shape(&groups), @r###"
    [0, 1] : [0] Join
    [2] : [1] OneToOne
    "###);
}

#[test]
fn test_groups_serialize_as_json() {
    let groups = group(2, 3, &[(0, 0), (0, 1), (1, 2)]);

    let value = serde_json::to_value(&groups[0]).unwrap();
    assert_eq!(value["source_indices"], serde_json::json!([0]));
    assert_eq!(value["target"], serde_json::json!(["t0", "t1"]));
    assert_eq!(
        serde_json::to_value(groups[0].kind()).unwrap(),
        serde_json::json!("Split")
    );

    let back: AlignmentGroup<String, String> = serde_json::from_value(value).unwrap();
    assert_eq!(back, groups[0]);
}

#[test]
fn test_both_grouped_is_dropped() {
    let groups = group(2, 2, &[(0, 0), (1, 1), (0, 1)]);

    insta::assert_snapshot!(shape(&groups), @r###"
    [0] : [0] OneToOne
    [1] : [1] OneToOne
    "###);
}

#[test]
fn test_groups_after_insertion_keep_their_indices() {
    // The inserted group shifts the joined group; later correspondences
    // must still find it.
    let groups = group(4, 3, &[(0, 0), (1, 0), (2, 0), (3, 1), (3, 2)]);

    insta::assert_snapshot!(shape(&groups), @r###"
    [2] : [0] OneToOne
    [0, 1] : [0] Join
    [3] : [1, 2] Split
    "###);
}

#[test]
fn test_identity_alignment() {
    let pairs: Vec<(usize, usize)> = (0..4).map(|i| (i, i)).collect();
    let groups = group(4, 4, &pairs);

    assert_eq!(groups.len(), 4);
    assert!(groups.iter().all(|g| g.kind() == GroupKind::OneToOne));
    assert_eq!(groups[3].target, vec!["t3"]);
}

#[test]
fn test_no_correspondences_no_groups() {
    assert!(group(2, 2, &[]).is_empty());
}
