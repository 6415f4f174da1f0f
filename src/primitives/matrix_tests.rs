pub(crate) use super::*;

#[test]
fn test_from_vec() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f32, 0.0, 1.0, 0.0, 1.0, 0.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.shape(), (2, 3));
    assert!((m.get(0, 0) - 1.0).abs() < 1e-6);
    assert!(m.get(1, 2).abs() < 1e-6);
}

#[test]
fn test_from_vec_error() {
    let result = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0]);
    assert!(result.is_err());
}

#[test]
fn test_from_rows() {
    let rows = vec![
        Vector::from_slice(&[1.0_f32, 0.0]),
        Vector::from_slice(&[0.0, 1.0]),
        Vector::from_slice(&[1.0, 1.0]),
    ];
    let m = Matrix::from_rows(&rows).expect("rows have equal length");
    assert_eq!(m.shape(), (3, 2));
    assert_eq!(m.row_slice(2), &[1.0, 1.0]);
}

#[test]
fn test_from_rows_ragged() {
    let rows = vec![
        Vector::from_slice(&[1.0_f32, 0.0]),
        Vector::from_slice(&[0.0]),
    ];
    assert!(Matrix::from_rows(&rows).is_err());
}

#[test]
fn test_from_rows_empty() {
    let m = Matrix::<f32>::from_rows(&[]).expect("empty is fine");
    assert_eq!(m.shape(), (0, 0));
}

#[test]
fn test_zeros() {
    let m = Matrix::<f32>::zeros(2, 3);
    assert_eq!(m.shape(), (2, 3));
    assert!(m.as_slice().iter().all(|&x| x == 0.0));
}

#[test]
fn test_set_and_get() {
    let mut m = Matrix::<f32>::zeros(2, 2);
    m.set(1, 0, 5.0);
    assert!((m.get(1, 0) - 5.0).abs() < 1e-6);
    assert_eq!(m.n_rows(), 2);
    assert_eq!(m.n_cols(), 2);
}

#[test]
fn test_row() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("valid dimensions");
    assert_eq!(m.row(1).as_slice(), &[4.0, 5.0, 6.0]);
    assert_eq!(m.row_slice(0), &[1.0, 2.0, 3.0]);
}

#[test]
fn test_select_rows_with_repeats() {
    let m = Matrix::from_vec(3, 2, vec![1.0_f32, 1.0, 2.0, 2.0, 3.0, 3.0])
        .expect("valid dimensions");
    let picked = m.select_rows(&[2, 0, 2]);
    assert_eq!(picked.shape(), (3, 2));
    assert_eq!(picked.as_slice(), &[3.0, 3.0, 1.0, 1.0, 3.0, 3.0]);
}
