//! Linear-system solver demo.
//!
//! Runs the direct and iterative solvers over two example systems: a
//! well-conditioned symmetric positive-definite square system and an
//! overdetermined least-squares problem (also solved via the normal
//! equations).

use nalgebra::{DMatrix, DVector};

use pose_interp_rs::solvers::{
    solve_bicgstab, solve_cholesky, solve_conjugate_gradient, solve_jacobi, solve_lu, solve_qr,
    solve_svd, SolveReport,
};

fn print_report(report: &SolveReport) {
    println!("\nMethod: {}", report.method);
    match &report.solution {
        Some(x) => {
            let rendered: Vec<String> = x.iter().map(|v| format!("{v:.6}")).collect();
            println!(" Solution x: [{}]", rendered.join(", "));
            if report.iterations > 0 {
                println!(" Iterations: {}", report.iterations);
            }
            println!(" Residual norm ||Ax-b||: {:.3e}", report.residual);
        }
        None => {
            println!(" Solver failed or did not converge.");
            if report.iterations > 0 {
                println!(" Iterations performed: {}", report.iterations);
            }
        }
    }
}

fn main() {
    println!("=== Example 1: Well-conditioned Square System ===");
    let a1 = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 1.0, 1.0, 3.0, -1.0, 1.0, -1.0, 2.0]);
    let b1 = DVector::from_row_slice(&[6.0, 3.0, 2.0]);
    println!("Matrix A1:\n{a1}");
    println!("Vector b1:\n{b1}");

    for report in [
        solve_lu(&a1, &b1),
        solve_cholesky(&a1, &b1),
        solve_qr(&a1, &b1),
        solve_svd(&a1, &b1),
        solve_conjugate_gradient(&a1, &b1),
        solve_bicgstab(&a1, &b1),
        solve_jacobi(&a1, &b1),
    ] {
        print_report(&report);
    }

    println!("\n=== Example 2: Least Squares (Overdetermined System) ===");
    let a2 = DMatrix::from_row_slice(4, 2, &[1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 4.0]);
    let b2 = DVector::from_row_slice(&[6.0, 5.0, 7.0, 10.0]);
    println!("Matrix A2:\n{a2}");
    println!("Vector b2:\n{b2}");

    for report in [solve_qr(&a2, &b2), solve_svd(&a2, &b2)] {
        print_report(&report);
    }

    // Normal equations A^T A x = A^T b reach the same minimizer, at the
    // cost of squaring the condition number.
    let ata = a2.transpose() * &a2;
    let atb = a2.transpose() * &b2;
    println!("\nSolving Normal Equations A^T A x = A^T b:");
    println!("A^T A:\n{ata}");
    println!("A^T b:\n{atb}");
    print_report(&solve_cholesky(&ata, &atb));
}
