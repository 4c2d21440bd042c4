use ndarray::Array2;

/// In-memory cosine similarity over the item × vocabulary matrix.
///
/// Row norms are computed once at construction; a zero-norm row (a movie
/// whose combined text had no tokens) scores 0.0 against every row including
/// itself rather than dividing by zero.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    matrix: Array2<f32>,
    norms: Vec<f32>,
}

impl SimilarityIndex {
    pub fn new(matrix: Array2<f32>) -> Self {
        let norms = matrix
            .rows()
            .into_iter()
            .map(|row| row.dot(&row).sqrt())
            .collect();
        Self { matrix, norms }
    }

    /// Number of items in the index.
    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.nrows() == 0
    }

    /// Cosine similarity of row `query` against every row, in item order.
    /// The query's own row is included. `query` must be a valid row index.
    pub fn similarity_row(&self, query: usize) -> Vec<f32> {
        let query_row = self.matrix.row(query);
        let query_norm = self.norms[query];

        self.matrix
            .rows()
            .into_iter()
            .zip(&self.norms)
            .map(|(row, &norm)| {
                let denominator = query_norm * norm;
                if denominator == 0.0 {
                    0.0
                } else {
                    (row.dot(&query_row) / denominator).clamp(0.0, 1.0)
                }
            })
            .collect()
    }
}
