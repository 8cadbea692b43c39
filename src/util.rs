use std::cmp::Ordering;

/// elements of both sorted slices. duplicates survive as often as they appear in both.
pub fn intersect_sorted<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let mut out = vec![];
    let mut ai = 0;
    let mut bi = 0;
    while ai < a.len() && bi < b.len() {
        match Ord::cmp(&a[ai], &b[bi]) {
            Ordering::Equal => {
                out.push(a[ai].clone());
                ai += 1;
                bi += 1;
            }
            Ordering::Less => {
                ai += 1;
            }
            Ordering::Greater => {
                bi += 1;
            }
        }
    }
    out
}

/// a - b for sorted slices
pub fn setminus_sorted<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let mut out = vec![];
    let mut bi = 0;
    for x in a {
        while bi < b.len() && b[bi] < *x {
            bi += 1;
        }
        if bi < b.len() && b[bi] == *x {
            continue;
        }
        out.push(x.clone());
    }
    out
}

/// insert into a sorted vec, keeping it sorted
pub fn insert_sorted<T: Ord>(v: &mut Vec<T>, x: T) {
    let pos = match v.binary_search(&x) {
        Ok(pos) | Err(pos) => pos,
    };
    v.insert(pos, x);
}

#[test]
fn test_intersect() {
    let a = [1,2,        5,8,9];
    let b = [0,2,2,2,3,4,5,  9,9,9];
    let i = intersect_sorted(&a, &b);
    assert_eq!(i, vec![2,5,9]);

    let a = [0,2,2,2,3,4,5,  9,9,9];
    let b = [1,2,        5,8,9];
    let i = intersect_sorted(&a, &b);
    assert_eq!(i, vec![2,5,9]);

    let a: [u32; 0] = [];
    let b = [0,2,2,2,3,4,5,  9,9,9];
    let i = intersect_sorted(&a, &b);
    assert_eq!(i, Vec::<u32>::new());

    let a = [2];
    let b = [3];
    let i = intersect_sorted(&a, &b);
    assert_eq!(i, Vec::<u32>::new());

    let a = [5];
    let b = [0,1,2,3,4,5];
    assert_eq!(intersect_sorted(&a, &b), vec![5]);
    assert_eq!(intersect_sorted(&b, &a), vec![5]);
}

#[test]
fn test_setminus() {
    assert_eq!(setminus_sorted(&[0,1,2,3,4,5], &[1,3,5,7]), vec![0,2,4]);
    assert_eq!(setminus_sorted(&[0,1,2], &[]), vec![0,1,2]);
    assert_eq!(setminus_sorted::<u32>(&[], &[1,2]), Vec::<u32>::new());
    assert_eq!(setminus_sorted(&[4,6], &[0,1,2,3]), vec![4,6]);
}

#[test]
fn test_insert() {
    let mut v = vec![1,3,7];
    insert_sorted(&mut v, 5);
    insert_sorted(&mut v, 0);
    insert_sorted(&mut v, 9);
    assert_eq!(v, vec![0,1,3,5,7,9]);
}
