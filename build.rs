//! Expands the configuration seeds in `data/configurations.txt` into the
//! permutation families used by the catalog.
//!
//! Every family is the orbit of one seed permutation under the rotation
//! generators of its shape. The build fails if two families share a
//! permutation or if families of one shape differ in size, so a bad seed can
//! never reach the resolver.

use std::collections::BTreeSet;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const SOURCE: &str = "data/configurations.txt";

struct Shape {
    name: String,
    size: usize,
    rotations: Vec<Vec<u8>>,
    seeds: Vec<Vec<u8>>,
}

fn main() {
    println!("cargo:rerun-if-changed={}", SOURCE);
    println!("cargo:rerun-if-changed=build.rs");

    let text = fs::read_to_string(SOURCE).expect("Failed to read configuration seeds");
    let shapes = parse(&text);

    let mut out = String::from("// @generated by build.rs from data/configurations.txt\n\n");
    for shape in &shapes {
        emit(&mut out, shape);
    }

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is not set");
    let dest = Path::new(&out_dir).join("configurations.rs");
    fs::write(dest, out).expect("Failed to write configuration tables");
}

fn parse(text: &str) -> Vec<Shape> {
    let mut shapes: Vec<Shape> = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let lineno = index + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().unwrap_or("");
        let fields: Vec<&str> = tokens.collect();

        if keyword == "shape" {
            let [name, size] = fields.as_slice() else {
                panic!("line {lineno}: expected `shape NAME SIZE`");
            };
            let size: usize = size
                .parse()
                .unwrap_or_else(|_| panic!("line {lineno}: invalid size `{size}`"));
            shapes.push(Shape {
                name: name.to_string(),
                size,
                rotations: Vec::new(),
                seeds: Vec::new(),
            });
            continue;
        }

        let shape = shapes
            .last_mut()
            .unwrap_or_else(|| panic!("line {lineno}: `{keyword}` before any `shape`"));
        match keyword {
            "rotation" => {
                let rotation: Vec<u8> = fields
                    .iter()
                    .map(|f| {
                        f.parse()
                            .unwrap_or_else(|_| panic!("line {lineno}: invalid index `{f}`"))
                    })
                    .collect();
                check_permutation(&rotation, shape.size, lineno);
                shape.rotations.push(rotation);
            }
            "seed" => {
                let [letters] = fields.as_slice() else {
                    panic!("line {lineno}: expected `seed LETTERS`");
                };
                let seed: Vec<u8> = letters.bytes().map(|b| b.wrapping_sub(b'A')).collect();
                check_permutation(&seed, shape.size, lineno);
                shape.seeds.push(seed);
            }
            other => panic!("line {lineno}: unknown keyword `{other}`"),
        }
    }
    shapes
}

fn check_permutation(perm: &[u8], size: usize, lineno: usize) {
    let distinct: BTreeSet<u8> = perm.iter().copied().collect();
    let in_range = perm.iter().all(|&p| (p as usize) < size);
    if perm.len() != size || distinct.len() != size || !in_range {
        panic!("line {lineno}: {perm:?} is not a permutation of 0..{size}");
    }
}

fn orbit(seed: &[u8], rotations: &[Vec<u8>]) -> BTreeSet<Vec<u8>> {
    let mut seen = BTreeSet::new();
    seen.insert(seed.to_vec());
    let mut pending = vec![seed.to_vec()];
    while let Some(perm) = pending.pop() {
        for rotation in rotations {
            let next: Vec<u8> = rotation.iter().map(|&i| perm[i as usize]).collect();
            if seen.insert(next.clone()) {
                pending.push(next);
            }
        }
    }
    seen
}

fn emit(out: &mut String, shape: &Shape) {
    let families: Vec<BTreeSet<Vec<u8>>> = shape
        .seeds
        .iter()
        .map(|seed| orbit(seed, &shape.rotations))
        .collect();
    let width = families.first().map_or(0, BTreeSet::len);

    let mut claimed = BTreeSet::new();
    for (i, family) in families.iter().enumerate() {
        assert_eq!(
            family.len(),
            width,
            "{} family {} has {} members, expected {}",
            shape.name,
            i + 1,
            family.len(),
            width
        );
        for perm in family {
            assert!(
                claimed.insert(perm.clone()),
                "{}: permutation {:?} appears in more than one family",
                shape.name,
                perm
            );
        }
    }

    let k = shape.size;
    let n = families.len();

    writeln!(out, "pub(crate) static {}_SEEDS: [[u8; {k}]; {n}] = [", shape.name).unwrap();
    for seed in &shape.seeds {
        writeln!(out, "    {seed:?},").unwrap();
    }
    writeln!(out, "];\n").unwrap();

    writeln!(
        out,
        "pub(crate) static {}_FAMILIES: [[[u8; {k}]; {width}]; {n}] = [",
        shape.name
    )
    .unwrap();
    for family in &families {
        writeln!(out, "    [").unwrap();
        for perm in family {
            writeln!(out, "        {perm:?},").unwrap();
        }
        writeln!(out, "    ],").unwrap();
    }
    writeln!(out, "];\n").unwrap();
}
