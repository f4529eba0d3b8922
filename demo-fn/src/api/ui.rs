//! UI Routes - HTML page for the fake news detector

use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::AppState;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new().route("/", get(root_page))
}

/// Root page - paste an article, press Predict
async fn root_page() -> impl IntoResponse {
    Html(
        r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Fake News Detector</title>
    <style>
        body {
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 800px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.6;
        }
        h1 {
            color: #333;
            border-bottom: 2px solid #0066cc;
            padding-bottom: 10px;
        }
        textarea {
            width: 100%;
            min-height: 220px;
            font: inherit;
            padding: 8px;
            box-sizing: border-box;
        }
        .button {
            display: inline-block;
            padding: 10px 20px;
            background: #0066cc;
            color: white;
            border: none;
            border-radius: 4px;
            margin: 10px 0;
            cursor: pointer;
        }
        .button:hover {
            background: #0052a3;
        }
        #result {
            display: none;
            padding: 16px;
            border-radius: 4px;
            margin-top: 20px;
        }
        #result.ok {
            background: #e6f4ea;
            color: #1e4620;
        }
        #result.error {
            background: #fdecea;
            color: #611a15;
        }
    </style>
</head>
<body>
    <h1>📰 Fake News Detector</h1>
    <p>Paste any news article below to see if it's fake or real.
       Empty or whitespace-only text is not classified.</p>

    <label for="news">Enter News Text</label>
    <textarea id="news"></textarea>
    <button class="button" id="predict">Predict</button>

    <div id="result"></div>

    <script>
        const result = document.getElementById('result');

        function show(kind, html) {
            result.className = kind;
            result.innerHTML = html;
            result.style.display = 'block';
        }

        document.getElementById('predict').addEventListener('click', async () => {
            const text = document.getElementById('news').value;
            try {
                const response = await fetch('/api/classify', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ text }),
                });
                const body = await response.json();
                if (!response.ok) {
                    show('error', body.error ? body.error.message : 'Prediction failed');
                    return;
                }
                show('ok', '<h2>Prediction:</h2><strong></strong>');
                result.querySelector('strong').textContent = body.label;
            } catch (e) {
                show('error', 'Prediction failed');
            }
        });
    </script>
</body>
</html>
        "#,
    )
}
