#![no_main]

use libfuzzer_sys::fuzz_target;
use si_core::{LinearMap, Offset, StateMatrix};

fuzz_target!(|data: &[u8]| {
    if data.len() < 10 {
        return;
    }

    // Small, independently chosen (so possibly inconsistent) shapes.
    // Values come from the remaining bytes.
    let dim = |b: u8| (b % 6) as usize;
    let (rows_d, rows_o) = (dim(data[0]), dim(data[1]));
    let (cols_d, cols_o) = (dim(data[2]), dim(data[3]));
    let (state_rows_d, state_rows_o) = (dim(data[4]), dim(data[5]));
    let offset_len = dim(data[6]);
    let (npt_d, npt_o) = ((data[7] % 16) as usize, (data[8] % 16) as usize);
    let sigma = (data[9] as f64 - 8.0) / 16.0;

    let payload = &data[10..];
    let values = |n: usize, salt: usize| -> Vec<f64> {
        (0..n)
            .map(|i| {
                let b = payload.get((i + salt) % payload.len().max(1)).copied().unwrap_or(0);
                (b as f64 - 128.0) / 16.0
            })
            .collect()
    };

    let Ok(a_d) = LinearMap::from_column_slice(rows_d, cols_d, &values(rows_d * cols_d, 0)) else {
        return;
    };
    let Ok(a_o) = LinearMap::from_column_slice(rows_o, cols_o, &values(rows_o * cols_o, 1)) else {
        return;
    };
    let Ok(d) =
        StateMatrix::from_column_slice(state_rows_d, npt_d, &values(state_rows_d * npt_d, 2))
    else {
        return;
    };
    let Ok(o) =
        StateMatrix::from_column_slice(state_rows_o, npt_o, &values(state_rows_o * npt_o, 3))
    else {
        return;
    };
    let h = Offset::from_slice(&values(offset_len, 4));

    let result = si_randomized::log_density_gaussian(sigma, &a_d, &d, &a_o, &o, &h);
    let consistent = npt_d == npt_o
        && rows_d == rows_o
        && cols_d == state_rows_d
        && cols_o == state_rows_o
        && offset_len == rows_o;
    match result {
        Ok(out) => {
            assert!(consistent && sigma > 0.0);
            assert_eq!(out.len(), npt_d);
            assert!(out.iter().all(|v| v.is_finite()));
        }
        Err(_) => assert!(!consistent || sigma <= 0.0),
    }
});
