//! Common source code fixtures for tests.

pub const VERTEX_SHADER: &str = r#"
cbuffer PerObject : register(b0)
{
    float4x4 WorldViewProj;
    float4 Tint;
};

struct VSInput
{
    float4 position : POSITION;
    float2 uv : TEXCOORD0;
};

struct PSInput
{
    float4 position : SV_Position;
    float2 uv : TEXCOORD0;
};

PSInput VSMain(VSInput input)
{
    PSInput output;
    output.position = mul(input.position, WorldViewProj);
    output.uv = input.uv;
    return output;
}
"#;

pub const PIXEL_SHADER: &str = r#"
Texture2D DiffuseMap : register(t0);
SamplerState LinearSampler : register(s0);

float4 PSMain(float4 position : SV_Position, float2 uv : TEXCOORD0) : SV_Target
{
    float4 color = DiffuseMap.Sample(LinearSampler, uv);
    return color;
}
"#;

pub const OVERLOADS: &str = r#"
float foo(float x) { return x; }
int foo(int x, int y) { return x + y; }
float3 foo(float3 v) { return v; }

void main()
{
    float a = foo(1.0f);
    int b = foo(1, 2);
    float3 c = foo(float3(1, 2, 3));
}
"#;

pub const MACROS: &str = r#"
#define SCALE 2.0
#define SQUARE(x) ((x) * (x))

float f(float v)
{
    return SQUARE(v) * SCALE;
}
"#;
