use anyhow::{ensure, Result};
use dense_matrix::Matrix;
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let m = Matrix::from_rows(&[
        [2.0, 5.0, 7.0],
        [6.0, 3.0, 4.0],
        [5.0, -2.0, -3.0],
    ])?;
    info!("Input matrix is {}x{}", m.rows(), m.cols());

    println!("Matrix:\n{}", m);
    println!("Determinant: {}", m.determinant()?);
    println!("Cofactors:\n{}", m.calc_complements()?);

    let inverse = m.inverse_matrix()?;
    println!("Inverse:\n{}", inverse);

    let product = &m * &inverse;
    ensure!(
        product == Matrix::identity(m.rows())?,
        "M * M^-1 is not the identity:\n{}",
        product
    );
    println!("M * M^-1 == I");

    let singular = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]])?;
    if let Err(err) = singular.inverse_matrix() {
        println!("Singular input rejected: {} ({:?})", err, err.kind());
    }

    Ok(())
}
