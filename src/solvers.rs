//! Dense linear-system solvers: direct decompositions and iterative methods.
//!
//! Every solver takes `A` and `b` for `Ax = b` and returns a uniform
//! [`SolveReport`]; a missing solution means the method does not apply to
//! the given system or failed to converge. QR and SVD accept overdetermined
//! systems in the least-squares sense.

use nalgebra::{DMatrix, DVector};

const MAX_ITERATIONS: usize = 1000;
const TOLERANCE: f64 = 1e-6;

/// Diagonal entries and inner products below this are treated as zero.
const BREAKDOWN_EPS: f64 = 1e-12;

/// Outcome of one solve attempt.
#[derive(Clone, Debug)]
pub struct SolveReport {
    /// Human-readable method name.
    pub method: &'static str,
    /// Solution vector; `None` when the method failed or does not apply.
    pub solution: Option<DVector<f64>>,
    /// Iterations used (iterative methods only).
    pub iterations: usize,
    /// Residual norm ‖Ax − b‖ for the returned (or last) iterate.
    pub residual: f64,
}

impl SolveReport {
    pub fn succeeded(&self) -> bool {
        self.solution.is_some()
    }

    fn failed(method: &'static str) -> Self {
        Self {
            method,
            solution: None,
            iterations: 0,
            residual: f64::NAN,
        }
    }

    fn direct(method: &'static str, a: &DMatrix<f64>, b: &DVector<f64>, x: DVector<f64>) -> Self {
        let residual = (a * &x - b).norm();
        Self {
            method,
            solution: Some(x),
            iterations: 0,
            residual,
        }
    }

    fn converged(
        method: &'static str,
        a: &DMatrix<f64>,
        b: &DVector<f64>,
        x: DVector<f64>,
        iterations: usize,
    ) -> Self {
        let residual = (a * &x - b).norm();
        Self {
            method,
            solution: Some(x),
            iterations,
            residual,
        }
    }
}

fn is_square_system(a: &DMatrix<f64>, b: &DVector<f64>) -> bool {
    a.is_square() && a.nrows() == b.len()
}

fn is_symmetric(a: &DMatrix<f64>) -> bool {
    if !a.is_square() {
        return false;
    }
    let n = a.nrows();
    for i in 0..n {
        for j in (i + 1)..n {
            if (a[(i, j)] - a[(j, i)]).abs() > 1e-9 {
                return false;
            }
        }
    }
    true
}

/// Partial-pivot LU decomposition. General square systems.
pub fn solve_lu(a: &DMatrix<f64>, b: &DVector<f64>) -> SolveReport {
    const METHOD: &str = "Partial-pivot LU";
    if !is_square_system(a, b) {
        log::warn!("{METHOD}: matrix must be square and match b");
        return SolveReport::failed(METHOD);
    }
    match a.clone().lu().solve(b) {
        Some(x) if x.iter().all(|v| v.is_finite()) => SolveReport::direct(METHOD, a, b, x),
        _ => {
            log::warn!("{METHOD}: solve failed, matrix may be singular");
            SolveReport::failed(METHOD)
        }
    }
}

/// Cholesky (LLT) decomposition. Symmetric positive-definite systems only.
pub fn solve_cholesky(a: &DMatrix<f64>, b: &DVector<f64>) -> SolveReport {
    const METHOD: &str = "Cholesky (LLT)";
    if !is_square_system(a, b) || !is_symmetric(a) {
        log::warn!("{METHOD}: matrix must be square, symmetric and match b");
        return SolveReport::failed(METHOD);
    }
    match a.clone().cholesky() {
        Some(cholesky) => SolveReport::direct(METHOD, a, b, cholesky.solve(b)),
        None => {
            log::warn!("{METHOD}: decomposition failed, matrix is not positive definite");
            SolveReport::failed(METHOD)
        }
    }
}

/// Householder QR decomposition. Square or overdetermined systems; the
/// latter are solved in the least-squares sense.
pub fn solve_qr(a: &DMatrix<f64>, b: &DVector<f64>) -> SolveReport {
    const METHOD: &str = "Householder QR";
    if a.nrows() != b.len() || a.nrows() < a.ncols() {
        log::warn!("{METHOD}: system must have at least as many equations as unknowns");
        return SolveReport::failed(METHOD);
    }
    let qr = a.clone().qr();
    let qtb = qr.q().transpose() * b;
    match qr.r().solve_upper_triangular(&qtb) {
        Some(x) => SolveReport::direct(METHOD, a, b, x),
        None => {
            log::warn!("{METHOD}: triangular solve failed, matrix may be rank deficient");
            SolveReport::failed(METHOD)
        }
    }
}

/// Singular value decomposition. Any shape; rank-deficient and
/// overdetermined systems resolve through the pseudo-inverse.
pub fn solve_svd(a: &DMatrix<f64>, b: &DVector<f64>) -> SolveReport {
    const METHOD: &str = "SVD";
    if a.nrows() != b.len() {
        log::warn!("{METHOD}: row count of A must match b");
        return SolveReport::failed(METHOD);
    }
    match a.clone().svd(true, true).solve(b, BREAKDOWN_EPS) {
        Ok(x) => SolveReport::direct(METHOD, a, b, x),
        Err(msg) => {
            log::warn!("{METHOD}: {msg}");
            SolveReport::failed(METHOD)
        }
    }
}

/// Conjugate gradient iteration. Symmetric positive-definite systems only.
pub fn solve_conjugate_gradient(a: &DMatrix<f64>, b: &DVector<f64>) -> SolveReport {
    const METHOD: &str = "Conjugate gradient";
    if !is_square_system(a, b) || !is_symmetric(a) {
        log::warn!("{METHOD}: matrix must be square, symmetric and match b");
        return SolveReport::failed(METHOD);
    }

    let mut x = DVector::zeros(b.len());
    let mut r = b - a * &x;
    let mut p = r.clone();
    let mut rs_old = r.dot(&r);

    for iter in 0..MAX_ITERATIONS {
        let ap = a * &p;
        let denom = p.dot(&ap);
        if denom.abs() < BREAKDOWN_EPS {
            // Direction with no curvature; the matrix is not positive
            // definite.
            break;
        }
        let alpha = rs_old / denom;
        x += alpha * &p;
        r -= alpha * &ap;

        let rs_new = r.dot(&r);
        if rs_new.sqrt() < TOLERANCE {
            return SolveReport::converged(METHOD, a, b, x, iter + 1);
        }
        p = &r + (rs_new / rs_old) * &p;
        rs_old = rs_new;
    }

    log::warn!("{METHOD}: no convergence within {MAX_ITERATIONS} iterations");
    SolveReport {
        method: METHOD,
        solution: None,
        iterations: MAX_ITERATIONS,
        residual: (a * &x - b).norm(),
    }
}

/// BiCGSTAB iteration. General square systems.
pub fn solve_bicgstab(a: &DMatrix<f64>, b: &DVector<f64>) -> SolveReport {
    const METHOD: &str = "BiCGSTAB";
    if !is_square_system(a, b) {
        log::warn!("{METHOD}: matrix must be square and match b");
        return SolveReport::failed(METHOD);
    }

    let n = b.len();
    let mut x = DVector::zeros(n);
    let mut r = b - a * &x;
    let r_hat = r.clone();
    let mut rho = 1.0;
    let mut alpha = 1.0;
    let mut omega = 1.0;
    let mut v = DVector::zeros(n);
    let mut p = DVector::zeros(n);

    for iter in 0..MAX_ITERATIONS {
        let rho_new = r_hat.dot(&r);
        if rho_new.abs() < BREAKDOWN_EPS {
            break;
        }
        let beta = (rho_new / rho) * (alpha / omega);
        p = &r + beta * (&p - omega * &v);
        v = a * &p;

        let denom = r_hat.dot(&v);
        if denom.abs() < BREAKDOWN_EPS {
            break;
        }
        alpha = rho_new / denom;

        let s = &r - alpha * &v;
        if s.norm() < TOLERANCE {
            x += alpha * &p;
            return SolveReport::converged(METHOD, a, b, x, iter + 1);
        }

        let t = a * &s;
        let tt = t.dot(&t);
        if tt < BREAKDOWN_EPS {
            break;
        }
        omega = t.dot(&s) / tt;

        x += alpha * &p + omega * &s;
        r = s - omega * &t;
        if r.norm() < TOLERANCE {
            return SolveReport::converged(METHOD, a, b, x, iter + 1);
        }
        rho = rho_new;
    }

    log::warn!("{METHOD}: breakdown or no convergence");
    SolveReport {
        method: METHOD,
        solution: None,
        iterations: MAX_ITERATIONS,
        residual: (a * &x - b).norm(),
    }
}

/// Plain Jacobi iteration. Square systems with a nonzero diagonal;
/// converges for diagonally dominant matrices.
pub fn solve_jacobi(a: &DMatrix<f64>, b: &DVector<f64>) -> SolveReport {
    const METHOD: &str = "Jacobi iteration";
    if !is_square_system(a, b) {
        log::warn!("{METHOD}: matrix must be square and match b");
        return SolveReport::failed(METHOD);
    }

    let n = b.len();
    for i in 0..n {
        if a[(i, i)].abs() < BREAKDOWN_EPS {
            log::warn!("{METHOD}: diagonal entry {i} is numerically zero");
            return SolveReport::failed(METHOD);
        }
    }

    let mut x = DVector::zeros(n);
    for iter in 0..MAX_ITERATIONS {
        let mut x_new = DVector::zeros(n);
        for i in 0..n {
            let mut sum = b[i];
            for j in 0..n {
                if j != i {
                    sum -= a[(i, j)] * x[j];
                }
            }
            x_new[i] = sum / a[(i, i)];
        }

        let step = (&x_new - &x).norm();
        x = x_new;
        if step < TOLERANCE {
            return SolveReport::converged(METHOD, a, b, x, iter + 1);
        }
    }

    log::warn!("{METHOD}: no convergence within {MAX_ITERATIONS} iterations");
    SolveReport {
        method: METHOD,
        solution: None,
        iterations: MAX_ITERATIONS,
        residual: (a * &x - b).norm(),
    }
}
