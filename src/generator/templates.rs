//! Tera templates for the generated text files.
//!
//! Dockerfiles share two partials: the non-root user block and the
//! HEALTHCHECK instruction.

use crate::error::{GeneratorError, Result};
use once_cell::sync::Lazy;
use serde::Serialize;
use tera::{Context, Tera};

const PARTIAL_USER_DEBIAN: &str = r#"{%- if non_root_user %}
RUN useradd -m -u 1000 appuser && chown -R appuser:appuser /app
USER appuser
{%- endif %}"#;

const PARTIAL_USER_ALPINE: &str = r#"{%- if non_root_user %}
RUN addgroup -g 1000 appuser && adduser -u 1000 -G appuser -s /bin/sh -D appuser
RUN chown -R appuser:appuser /app
USER appuser
{%- endif %}"#;

const PARTIAL_HEALTHCHECK: &str = r#"{%- if health_check %}
HEALTHCHECK --interval=30s --timeout=10s --start-period=5s --retries=3 \
    CMD {{ health_check }}
{%- endif %}"#;

const PYTHON_DOCKERFILE: &str = r#"FROM {{ base_image }}

WORKDIR /app

RUN apt-get update && apt-get install -y --no-install-recommends \
    gcc \
    curl \
    && rm -rf /var/lib/apt/lists/*
{% if manifests %}
COPY {{ manifests | join(sep=" ") }} ./
RUN {{ install_command }}
{% endif %}
COPY . .
{% include "user_debian" %}
{%- if framework == "django" %}

RUN python manage.py collectstatic --noinput || true
{%- endif %}

EXPOSE {{ port }}
{% include "healthcheck" %}

{{ cmd }}
"#;

const NODE_DOCKERFILE: &str = r#"FROM {{ base_image }}

WORKDIR /app

RUN apk add --no-cache curl
{%- if corepack %}
RUN corepack enable
{%- endif %}

COPY {{ manifests | join(sep=" ") }} ./
RUN {{ install_command }}

COPY . .
{%- if build_command %}
RUN {{ build_command }}
{%- endif %}
{% include "user_alpine" %}

EXPOSE {{ port }}
{% include "healthcheck" %}

{{ cmd }}
"#;

const NEXT_DOCKERFILE: &str = r#"FROM {{ base_image }} AS builder

WORKDIR /app
{%- if corepack %}
RUN corepack enable
{%- endif %}

COPY {{ manifests | join(sep=" ") }} ./
RUN {{ install_command }}

COPY . .
RUN {{ build_command }}

FROM {{ runtime_image }} AS runner

WORKDIR /app
ENV NODE_ENV=production
ENV PORT={{ port }}

RUN apk add --no-cache curl
{%- if corepack %}
RUN corepack enable
{%- endif %}
{% include "user_alpine" %}

COPY --from=builder /app ./

EXPOSE {{ port }}
{% include "healthcheck" %}

{{ cmd }}
"#;

const STATIC_SITE_DOCKERFILE: &str = r#"FROM {{ base_image }} AS builder

WORKDIR /app
{%- if corepack %}
RUN corepack enable
{%- endif %}

COPY {{ manifests | join(sep=" ") }} ./
RUN {{ install_command }}

COPY . .
RUN {{ build_command }}

FROM {{ runtime_image }} AS runner

COPY --from=builder /app/{{ static_dir }} /usr/share/nginx/html
RUN sed -i 's/listen  *80;/listen {{ port }};/' /etc/nginx/conf.d/default.conf

EXPOSE {{ port }}
{% include "healthcheck" %}

CMD ["nginx", "-g", "daemon off;"]
"#;

const JVM_DOCKERFILE: &str = r#"FROM {{ base_image }} AS builder

WORKDIR /app

COPY . .
RUN {{ build_command }}

FROM {{ runtime_image }} AS runner

WORKDIR /app

RUN apk add --no-cache curl
{% include "user_alpine" %}

COPY --from=builder /app/{{ artifact }} app.jar

EXPOSE {{ port }}
{% include "healthcheck" %}

CMD ["java", "-jar", "app.jar"]
"#;

const GO_DOCKERFILE: &str = r#"FROM {{ base_image }} AS builder

WORKDIR /app

COPY go.mod go.sum* ./
RUN go mod download

COPY . .
RUN CGO_ENABLED=0 GOOS=linux go build -o main .

FROM {{ runtime_image }} AS runner

WORKDIR /app

RUN apk --no-cache add ca-certificates
{% include "user_alpine" %}

COPY --from=builder /app/main .

EXPOSE {{ port }}
{% include "healthcheck" %}

CMD ["./main"]
"#;

const RUST_DOCKERFILE: &str = r#"FROM {{ base_image }} AS builder

WORKDIR /app

COPY . .
RUN cargo install --path . --root /app/dist && mv /app/dist/bin/* /app/dist/app

FROM {{ runtime_image }} AS runner

WORKDIR /app

RUN apt-get update && apt-get install -y --no-install-recommends \
    ca-certificates \
    curl \
    && rm -rf /var/lib/apt/lists/*

COPY --from=builder /app/dist/app ./app
{% include "user_debian" %}

EXPOSE {{ port }}
{% include "healthcheck" %}

CMD ["./app"]
"#;

const GENERIC_DOCKERFILE: &str = r#"FROM {{ base_image }}

WORKDIR /app

RUN apt-get update && apt-get install -y --no-install-recommends \
    ca-certificates \
    curl \
    && rm -rf /var/lib/apt/lists/*
{%- if manifests %}

COPY {{ manifests | join(sep=" ") }} ./
RUN {{ install_command }}
{%- endif %}

COPY . .
{% include "user_debian" %}

EXPOSE {{ port }}
{% include "healthcheck" %}

{{ cmd }}
"#;

const README: &str = r#"# Containerization Guide: {{ project_name }}

## Repository Analysis
- **Primary Language**: {{ language }}
- **Framework**: {{ framework }}
- **Package Manager**: {{ package_manager }}
- **Port**: {{ port }}
{%- if databases %}
- **Databases**: {{ databases | join(sep=", ") }}
{%- endif %}

## Quick Start

### Using Docker
```bash
# Build the image
docker build -t {{ image_name }} .

# Run the container
docker run -p {{ port }}:{{ port }} --env-file .env {{ image_name }}
```

### Using Docker Compose
```bash
# Start all services
docker compose up -d

# View logs
docker compose logs -f

# Stop services
docker compose down
```

## Environment Variables
{% if environment_variables -%}
{% for name, description in environment_variables -%}
- `{{ name }}`: {{ description }}
{% endfor -%}
{% else -%}
No environment variables detected.
{% endif %}
## Commands
- **Install**: `{{ commands.install }}`
- **Build**: `{{ commands.build }}`
- **Start**: `{{ commands.start }}`
- **Test**: `{{ commands.test }}`

## Health Check
The container includes a health check: `{{ health_check }}`
{% if dependencies %}
## Dependencies
{% for dependency in dependencies -%}
- {{ dependency }}
{% endfor -%}
{% endif %}
{%- if build_tools %}
## Build Tools
{% for tool in build_tools -%}
- {{ tool }}
{% endfor -%}
{% endif %}
{%- if recommendations %}
## Recommendations
{% for recommendation in recommendations -%}
- {{ recommendation }}
{% endfor -%}
{% endif %}
---
*Generated by repo-containerizer {{ version }}*
"#;

static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("user_debian", PARTIAL_USER_DEBIAN),
        ("user_alpine", PARTIAL_USER_ALPINE),
        ("healthcheck", PARTIAL_HEALTHCHECK),
        ("python.dockerfile", PYTHON_DOCKERFILE),
        ("node.dockerfile", NODE_DOCKERFILE),
        ("next.dockerfile", NEXT_DOCKERFILE),
        ("static-site.dockerfile", STATIC_SITE_DOCKERFILE),
        ("jvm.dockerfile", JVM_DOCKERFILE),
        ("go.dockerfile", GO_DOCKERFILE),
        ("rust.dockerfile", RUST_DOCKERFILE),
        ("generic.dockerfile", GENERIC_DOCKERFILE),
        ("readme.md", README),
    ])
    .expect("built-in templates parse");
    tera
});

/// Renders a built-in template with a serializable context
pub fn render<T: Serialize>(template: &str, data: &T) -> Result<String> {
    let context = Context::from_serialize(data)?;
    TEMPLATES
        .render(template, &context)
        .map_err(|e| GeneratorError::TemplateRendering(format!("{}: {}", template, e)).into())
}
